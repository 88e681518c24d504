use std::sync::Arc;

use easyplot::api::{
    AspectMode, AxesId, AxesManager, AxesProperty, AxesSettings, LayerCollection, SettingValue,
};
use easyplot::core::style::style_options;
use easyplot::core::{AxisRange, Dataset, DrawPrimitive, StyleOptions, StyleValue, VALUE_TYPE_KEY};
use easyplot::error::PlotError;
use easyplot::render::{NullSurface, ValueChannel};
use ndarray::{Array1, Array2};

fn value_points() -> Dataset {
    Dataset::value_points(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![3.0, 1.0, 2.0, 0.0],
        vec![0.1, 0.4, 0.2, 0.9],
    )
    .expect("value points")
}

#[test]
fn add_edit_delete_round_trip() {
    let mut layers = LayerCollection::new();
    layers.add(value_points(), StyleOptions::new());
    layers
        .edit_current(false, style_options([("alpha", 0.3)]))
        .expect("edit");
    assert_eq!(
        layers.current().expect("current").style()["alpha"],
        StyleValue::Number(0.3)
    );
    layers.delete(0).expect("delete");
    assert!(layers.is_empty());
    assert!(layers.current().is_none());
}

#[test]
fn order_rejects_bad_sequences_and_keeps_layers() {
    let mut layers = LayerCollection::new();
    layers.add(value_points(), StyleOptions::new());
    layers.add(
        Dataset::points(vec![0.0, 1.0], vec![1.0, 0.0]).expect("points"),
        StyleOptions::new(),
    );
    let before = layers.clone();
    for bad in [vec![0, 0], vec![2, 0], vec![1], vec![]] {
        let err = layers.order(&bad).expect_err("invalid order");
        assert!(matches!(err, PlotError::InvalidPermutation(_)));
    }
    assert_eq!(layers, before);

    layers.order(&[1, 0]).expect("swap");
    assert_eq!(
        layers.get(0).expect("first").dataset().layer_name(),
        "points.scatter"
    );
    layers.order(&[1, 0]).expect("swap back");
    assert_eq!(layers, before);
}

#[test]
fn value_channel_is_taken_from_style_and_stripped() {
    let mut layers = LayerCollection::new();
    layers.add(value_points(), style_options([(VALUE_TYPE_KEY, "s")]));
    let mut surface = NullSurface::default();
    layers.render(&mut surface).expect("render");

    let call = &surface.draws()[0];
    assert_eq!(call.primitive, DrawPrimitive::ValueScatter);
    assert_eq!(call.channel, Some(ValueChannel::Size));
    assert!(!call.style.contains_key(VALUE_TYPE_KEY));
    assert_eq!(call.style["cmap"], StyleValue::colormap("inferno"));

    layers
        .edit_current(false, style_options([(VALUE_TYPE_KEY, "q")]))
        .expect("edit");
    assert!(layers.render(&mut surface).is_err());
}

#[test]
fn layers_share_datasets_between_collections() {
    let dataset = Arc::new(value_points());
    let mut first = LayerCollection::new();
    let mut second = LayerCollection::new();
    first.add(Arc::clone(&dataset), StyleOptions::new());
    second.add(Arc::clone(&dataset), StyleOptions::new());
    assert_eq!(Arc::strong_count(&dataset), 3);
    let copy = first.clone();
    assert!(Arc::ptr_eq(
        copy.get(0).expect("layer").dataset_handle(),
        &dataset
    ));
}

#[test]
fn every_kind_renders_with_its_primitive() {
    let x = Array1::linspace(0.0, 1.0, 4);
    let y = Array1::linspace(0.0, 1.0, 3);
    let datasets = [
        Dataset::timeseries(x.clone(), x.clone()).expect("timeseries"),
        Dataset::points(x.clone(), x.clone()).expect("points"),
        value_points(),
        Dataset::grid(x.clone(), y.clone(), Array2::<f64>::zeros((3, 4))).expect("grid"),
        Dataset::irregular_grid(
            Array2::<f64>::zeros((3, 4)),
            Array2::<f64>::zeros((3, 4)),
            Array2::<f64>::zeros((3, 4)),
        )
        .expect("irregular grid"),
        Dataset::vector_data(
            x,
            y,
            Array2::<f64>::zeros((3, 4)),
            Array2::<f64>::ones((3, 4)),
        )
        .expect("vector data"),
    ];
    let mut layers = LayerCollection::new();
    for dataset in datasets {
        layers.add(dataset, StyleOptions::new());
    }
    let mut surface = NullSurface::default();
    let handles = layers.render(&mut surface).expect("render");
    let primitives: Vec<DrawPrimitive> = handles.iter().map(|handle| handle.primitive).collect();
    assert_eq!(
        primitives,
        vec![
            DrawPrimitive::Line,
            DrawPrimitive::Scatter,
            DrawPrimitive::ValueScatter,
            DrawPrimitive::Mesh,
            DrawPrimitive::IrregularMesh,
            DrawPrimitive::Quiver,
        ]
    );
}

#[test]
fn axes_format_validates_the_whole_batch() {
    let mut axes = AxesManager::new(AxesId::new(3), NullSurface::default());
    axes.format_pairs(false, [("title", SettingValue::from("kept"))])
        .expect("title");

    let err = axes
        .format_pairs(
            false,
            [
                ("aspect", SettingValue::Aspect(AspectMode::Equal)),
                ("xlim", SettingValue::from("not a range")),
            ],
        )
        .expect_err("bad value");
    assert!(matches!(err, PlotError::InvalidSetting { .. }));
    assert!(!axes.settings().contains(AxesProperty::Aspect));
    assert!(!axes.surface().settings().contains_key(&AxesProperty::Aspect));
}

#[test]
fn axes_extend_limits_never_shrink() {
    let mut axes = AxesManager::new(AxesId::new(0), NullSurface::default());
    axes.check_and_extend_limits(AxisRange::new(0.0, 10.0), AxisRange::new(1.0, 2.0))
        .expect("seed");
    axes.check_and_extend_limits(AxisRange::new(-5.0, 3.0), AxisRange::new(1.5, 1.6))
        .expect("extend");
    assert_eq!(
        axes.settings().range(AxesProperty::XLim),
        Some(AxisRange::new(-5.0, 10.0))
    );
    assert_eq!(
        axes.surface().settings()[&AxesProperty::XLim],
        SettingValue::Range(AxisRange::new(-5.0, 10.0))
    );
}

#[test]
fn axes_state_survives_a_new_surface() {
    let mut axes = AxesManager::new(AxesId::new(0), NullSurface::default());
    axes.add_dataset(value_points(), StyleOptions::new())
        .expect("add");
    axes.format(
        false,
        AxesSettings::parse([("ylabel", "depth")]).expect("ylabel"),
    )
    .expect("format");

    let state = axes.state();
    let rebuilt = AxesManager::from_state(AxesId::new(1), NullSurface::default(), axes.into_state())
        .expect("rebuild");
    assert_eq!(rebuilt.state(), state);
    assert_eq!(rebuilt.surface().settings().len(), state.settings.len());
    assert!(rebuilt.to_string().starts_with("axes 1 at"));
}
