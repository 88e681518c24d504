use easyplot::api::{AxesProperty, AxesSettings, FigureConfig, FigureManager, FigureSnapshot};
use easyplot::core::{AxesPosition, AxisRange, Dataset, StyleOptions, StyleValue, classify};
use easyplot::core::style::style_options;
use easyplot::error::PlotError;
use easyplot::render::{NullFigure, NullSurface};
use ndarray::{Array1, Array2};

fn figure() -> FigureManager<NullFigure> {
    FigureManager::new(NullFigure::new(), FigureConfig::default()).expect("figure init")
}

fn sample_points() -> Dataset {
    Dataset::points(vec![3.0, 1.0, 2.0], vec![1.0, 5.0, 2.0]).expect("points")
}

fn sample_grid() -> Dataset {
    Dataset::grid(
        Array1::linspace(0.0, 1.0, 4),
        Array1::linspace(0.0, 1.0, 3),
        Array2::<f64>::ones((3, 4)),
    )
    .expect("grid")
}

#[test]
fn figure_smoke_flow() {
    let mut figure = figure();
    let t = Array1::linspace(0.0, 7.0, 100);
    let v = t.mapv(f64::sin);
    let dataset = classify((t, v), None).expect("classified");

    figure
        .add_dataset(dataset, style_options([("linestyle", "--")]))
        .expect("add dataset");
    figure
        .format_axes(
            0,
            false,
            AxesSettings::parse([("title", "sine"), ("xlabel", "t")]).expect("settings"),
        )
        .expect("format");

    let drawables = figure.render().expect("render");
    assert_eq!(drawables.len(), 1);
    assert_eq!(drawables[0].len(), 1);

    let surface: &NullSurface = figure.current_axes().surface();
    assert_eq!(surface.draws().len(), 1);
    assert_eq!(
        surface.draws()[0].style["linestyle"],
        StyleValue::from("--")
    );
    assert!(surface.settings().contains_key(&AxesProperty::Title));
    assert!(surface.settings().contains_key(&AxesProperty::YLim));
}

#[test]
fn shrinking_without_reset_keeps_leading_axes() {
    let mut figure = figure();
    figure.set_axes_count(4, true).expect("grow");
    for index in 0..4 {
        figure.set_current_axes(index).expect("cursor");
        figure
            .add_dataset(sample_points(), StyleOptions::new())
            .expect("add");
        figure
            .format_axes(
                index,
                false,
                AxesSettings::parse([("title", format!("axes {index}"))]).expect("title"),
            )
            .expect("format");
    }
    let before: Vec<_> = figure.axes().iter().take(2).map(|axes| axes.state()).collect();

    figure.set_axes_count(2, false).expect("shrink");
    assert_eq!(figure.axes_count(), 2);
    let after: Vec<_> = figure.axes().iter().map(|axes| axes.state()).collect();
    assert_eq!(before, after);
}

#[test]
fn growing_without_reset_adds_fresh_axes() {
    let mut figure = figure();
    figure
        .add_dataset(sample_points(), StyleOptions::new())
        .expect("add");
    figure.set_axes_count(3, false).expect("grow");

    assert_eq!(figure.axes_at(0).expect("first").layers().len(), 1);
    assert!(figure.axes_at(1).expect("second").layers().is_empty());
    assert!(figure.axes_at(2).expect("third").settings().is_empty());
}

#[test]
fn reset_discards_layers_and_settings() {
    let mut figure = figure();
    figure
        .add_dataset(sample_points(), StyleOptions::new())
        .expect("add");
    figure.set_axes_count(2, true).expect("reset");
    assert!(figure.axes().iter().all(|axes| axes.layers().is_empty()));
    assert!(figure.axes().iter().all(|axes| axes.settings().is_empty()));
}

#[test]
fn set_style_preserves_positions_and_layers() {
    let mut figure = figure();
    figure.set_axes_count(3, true).expect("grid");
    figure.set_row_count(2, true).expect("rows");
    figure
        .set_axes_position(2, AxesPosition::new(0.6, 0.1, 0.3, 0.25))
        .expect("custom position");
    figure.set_current_axes(1).expect("cursor");
    figure
        .add_dataset(sample_grid(), style_options([("cmap", StyleValue::colormap("jet"))]))
        .expect("add");

    let positions = figure.positions();
    let states: Vec<_> = figure.axes().iter().map(|axes| axes.state()).collect();

    figure.set_style("ggplot").expect("style");
    assert_eq!(figure.style(), Some("ggplot"));
    assert_eq!(figure.positions(), positions);
    let restored: Vec<_> = figure.axes().iter().map(|axes| axes.state()).collect();
    assert_eq!(restored, states);
    assert!(
        figure
            .axes()
            .iter()
            .all(|axes| axes.surface().style() == Some("ggplot"))
    );
}

#[test]
fn unknown_style_leaves_the_figure_usable() {
    let mut figure = figure();
    figure.set_axes_count(2, true).expect("grid");
    figure
        .add_dataset(sample_points(), StyleOptions::new())
        .expect("add");
    let ids: Vec<_> = figure.axes().iter().map(|axes| axes.id()).collect();
    let positions = figure.positions();
    let states: Vec<_> = figure.axes().iter().map(|axes| axes.state()).collect();

    let err = figure.set_style("vaporwave").expect_err("unknown style");
    assert!(matches!(err, PlotError::Backend(_)));
    assert_eq!(figure.style(), None);
    let unchanged: Vec<_> = figure.axes().iter().map(|axes| axes.id()).collect();
    assert_eq!(unchanged, ids);
    assert_eq!(figure.positions(), positions);
    let restored: Vec<_> = figure.axes().iter().map(|axes| axes.state()).collect();
    assert_eq!(restored, states);
    assert_eq!(figure.backend().live_surfaces(), figure.axes_count());

    let drawables = figure.render().expect("render after failed switch");
    assert_eq!(drawables[0].len(), 1);
}

#[test]
fn failed_rebuild_keeps_previous_axes() {
    let backend = NullFigure::new().with_surface_limit(2);
    let mut figure = FigureManager::new(backend, FigureConfig::default()).expect("figure");
    figure.set_axes_count(2, true).expect("within backend limit");
    let ids: Vec<_> = figure.axes().iter().map(|axes| axes.id()).collect();

    assert!(figure.set_axes_count(3, false).is_err());
    assert_eq!(figure.axes_count(), 2);
    let unchanged: Vec<_> = figure.axes().iter().map(|axes| axes.id()).collect();
    assert_eq!(unchanged, ids);
    assert_eq!(figure.backend().live_surfaces(), 2);
    figure.render().expect("render after failed rebuild");
}

#[test]
fn index_of_rejects_foreign_axes() {
    let first = figure();
    let mut second = figure();
    second.set_axes_count(2, true).expect("grid");

    let foreign = second.axes_at(1).expect("second axes");
    assert!(matches!(
        first.index_of(foreign),
        Err(PlotError::NotFound(_))
    ));
    assert_eq!(second.index_of(foreign).expect("owned"), 1);
}

#[test]
fn configured_caps_bound_the_grid() {
    let config = FigureConfig::default().with_max_axes(3).with_max_rows(2);
    let mut figure = FigureManager::new(NullFigure::new(), config).expect("figure");
    assert!(figure.set_axes_count(4, true).is_err());
    assert!(figure.set_row_count(3, true).is_err());
    figure.set_axes_count(3, true).expect("count");
    figure.set_row_count(2, true).expect("rows");
    assert_eq!(figure.column_count(), 2);
}

#[test]
fn limits_widen_across_datasets_on_one_axes() {
    let mut figure = figure();
    let narrow = Dataset::points(vec![0.0, 10.0], vec![0.0, 1.0]).expect("narrow");
    let wide = Dataset::points(vec![-5.0, 3.0], vec![0.25, 0.5]).expect("wide");
    figure.add_dataset(narrow, StyleOptions::new()).expect("narrow");
    let after_first = figure
        .current_axes()
        .settings()
        .range(AxesProperty::XLim)
        .expect("xlim");
    figure.add_dataset(wide, StyleOptions::new()).expect("wide");
    let after_second = figure
        .current_axes()
        .settings()
        .range(AxesProperty::XLim)
        .expect("xlim");

    assert!(after_second.min <= after_first.min);
    assert!(after_second.max >= after_first.max);
    assert_eq!(after_second.union(after_first), after_second);
    assert!(after_second.contains(-5.0));
    assert_ne!(after_second, AxisRange::new(-5.0, 10.0));
}

#[test]
fn snapshot_describes_the_figure() {
    let mut figure = FigureManager::new(
        NullFigure::new(),
        FigureConfig::default().with_style("bmh"),
    )
    .expect("figure");
    figure
        .add_dataset(sample_grid(), StyleOptions::new())
        .expect("add");

    let snapshot = figure.snapshot();
    assert_eq!(snapshot.style.as_deref(), Some("bmh"));
    assert_eq!(snapshot.rows, 1);
    assert_eq!(snapshot.axes.len(), 1);
    let layer = &snapshot.axes[0].layers[0];
    assert_eq!(layer.layer_name, "grid.pcolormesh");
    assert_eq!(layer.shapes, vec![vec![4], vec![3], vec![3, 4]]);
    assert_eq!(snapshot.axes[0].current_layer, Some(0));

    let json = snapshot.to_json_contract_v1_pretty().expect("json");
    assert!(json.contains("\"schema_version\": 1"));
    let parsed = FigureSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = snapshot.to_json_pretty().expect("bare json");
    let parsed = FigureSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, snapshot);
}
