mod common;

#[cfg(test)]
mod tests {
    use crate::common::{init_tracing, ScriptedChild};
    use dockgrid::{
        Anchor, DockChild, DockLayout, DockPanel, Inset, LayoutConstraints, LayoutOptions,
        Position, Rect, RegionSpec, Side, Size, StaticRegion,
    };
    use float_cmp::assert_approx_eq;

    fn plot_panel() -> DockPanel<StaticRegion> {
        DockPanel::new(
            Anchor::Fill,
            vec![
                StaticRegion::new(Anchor::Left, 40.0, 0.0),
                StaticRegion::new(Anchor::Bottom, 0.0, 24.0).with_overflow(Inset {
                    top: 0.0,
                    bottom: 0.0,
                    left: 6.0,
                    right: 6.0,
                }),
                StaticRegion::new(Anchor::Fill, 0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_root_panel() {
        let mut panel = plot_panel();
        let result = panel
            .layout_root(Size::new(300.0, 180.0), &LayoutConstraints::default())
            .unwrap()
            .clone();

        assert_eq!(result.fill_size, Size::new(260.0, 156.0));
        // The axis spills past the plot's right edge, there is no corner to take it
        assert_eq!(
            result.requested_own_padding,
            Some(Inset::ZERO.with(Side::Right, 6.0))
        );
        assert_eq!(panel.last_layout(), Some(&result));

        let bottom = &panel.children()[1];
        assert_eq!(
            result.child_bounds(&bottom.position(), bottom.resolved_size()),
            Rect::new(40.0, 156.0, 260.0, 24.0)
        );
    }

    #[test]
    fn test_nested_panel_forwards_overflow_as_padding() {
        init_tracing();
        let mut title = StaticRegion::new(Anchor::Top, 100.0, 20.0);
        let mut panel = plot_panel();
        let result = {
            let mut children: Vec<&mut dyn DockChild> = vec![&mut title, &mut panel];
            DockLayout::default()
                .compute_layout(
                    &mut children,
                    Size::new(300.0, 200.0),
                    &LayoutConstraints::default(),
                )
                .unwrap()
        };

        assert_eq!(result.paddings, Inset::ZERO.with(Side::Right, 6.0));
        assert_eq!(result.requested_own_padding, None);
        assert_eq!(result.diagnostics.padding_iterations, 2);

        // The panel lays its children out inside the granted padding
        let inner = panel.last_layout().unwrap();
        assert_eq!(inner.client_size, Size::new(294.0, 180.0));
        assert_eq!(inner.fill_size, Size::new(254.0, 156.0));
        assert_eq!(panel.resolved_size(), Size::new(300.0, 180.0));
        assert_eq!(
            result.child_bounds(&panel.position(), panel.resolved_size()),
            Rect::new(0.0, 20.0, 300.0, 180.0)
        );

        let title_constraints = title.last_constraints().unwrap();
        assert_approx_eq!(f32, title_constraints.paddings.right, 6.0);
    }

    #[test]
    fn test_nested_panel_forwards_growth() {
        let mut panel = DockPanel::new(
            Anchor::Fill,
            vec![
                ScriptedChild::side(Anchor::Left, 30.0),
                ScriptedChild::new(Anchor::Fill, 400.0, 0.0),
            ],
        );
        let mut title = ScriptedChild::side(Anchor::Top, 20.0);
        let result = {
            let mut children: Vec<&mut dyn DockChild> = vec![&mut title, &mut panel];
            DockLayout::default()
                .compute_layout(
                    &mut children,
                    Size::new(300.0, 200.0),
                    &LayoutConstraints::default(),
                )
                .unwrap()
        };

        assert_eq!(result.client_size, Size::new(430.0, 200.0));
        assert_eq!(result.fill_size, Size::new(430.0, 180.0));
        let inner = panel.last_layout().unwrap();
        assert_eq!(inner.client_size, Size::new(430.0, 180.0));
        assert_eq!(inner.fill_size, Size::new(400.0, 180.0));
    }

    #[test]
    fn test_regions_from_config() {
        let specs: Vec<RegionSpec> = serde_json::from_str(
            r#"[
                {"anchor": "top", "alignment": "center", "width": 120, "height": 18},
                {"anchor": "right", "width": 70, "height": 0},
                {"anchor": "fill", "width": 0, "height": 0},
                {"anchor": "left", "width": 45, "height": 0, "visible": false}
            ]"#,
        )
        .unwrap();
        let regions = specs
            .into_iter()
            .map(StaticRegion::try_from)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let mut panel = DockPanel::new(Anchor::Fill, regions);
        let result = panel
            .layout_root(Size::new(400.0, 300.0), &LayoutConstraints::default())
            .unwrap();

        assert_eq!(result.margins.top, 18.0);
        assert_eq!(result.margins.right, 70.0);
        assert_eq!(result.margins.left, 0.0);
        assert_eq!(result.fill_size, Size::new(330.0, 282.0));

        let title = &panel.children()[0];
        let title_bounds = panel
            .last_layout()
            .unwrap()
            .child_bounds(&title.position(), title.resolved_size());
        assert_approx_eq!(f32, title_bounds.x, 105.0);
        assert_approx_eq!(f32, title_bounds.width, 120.0);
    }

    #[test]
    fn test_hidden_regions_and_fixed_paddings() {
        let mut title = StaticRegion::new(Anchor::Top, 0.0, 20.0)
            .with_paddings(Inset::ZERO.with(Side::Left, 15.0));
        let mut legend = StaticRegion::new(Anchor::Right, 80.0, 0.0).with_visible(false);
        let mut inset = plot_panel().with_visible(false);
        let mut plot = DockPanel::new(Anchor::Fill, vec![StaticRegion::new(Anchor::Fill, 0.0, 0.0)])
            .with_options(LayoutOptions {
                max_padding_iterations: 3,
                ..Default::default()
            })
            .unwrap();
        let result = {
            let mut children: Vec<&mut dyn DockChild> =
                vec![&mut title, &mut legend, &mut inset, &mut plot];
            DockLayout::default()
                .compute_layout(
                    &mut children,
                    Size::new(300.0, 200.0),
                    &LayoutConstraints::default(),
                )
                .unwrap()
        };

        assert_eq!(result.margins, Inset::ZERO.with(Side::Top, 20.0));
        assert_eq!(result.paddings, Inset::ZERO.with(Side::Left, 15.0));
        assert_eq!(legend.position(), Position::default());
        assert_eq!(inset.position(), Position::default());

        let plot_layout = plot.last_layout().unwrap();
        assert_eq!(plot_layout.client_size, Size::new(285.0, 180.0));
        assert_eq!(plot.resolved_size(), Size::new(300.0, 180.0));
    }

    #[test]
    fn test_panel_rejects_invalid_options() {
        let options = LayoutOptions {
            margin_epsilon: -1.0,
            ..Default::default()
        };
        assert!(plot_panel().with_options(options).is_err());
    }
}
