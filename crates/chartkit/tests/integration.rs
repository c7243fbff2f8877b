//! End-to-end tests: YAML config, events, tooltip and teardown.

use chartkit::prelude::*;
use chartkit::layout::TooltipState;
use chartkit::DrawKind;

const REVENUE_YAML: &str = r##"
kind: vertical_bar
size: { width: 420, height: 240 }
y_axis:
  prefix: "$"
series:
  - name: "2024"
    data:
      - { key: Jan, value: 120 }
      - { key: Feb, value: 90 }
      - { key: Mar, value: 150 }
      - { key: Apr, value: 60 }
  - name: "2023"
    comparison: true
    data:
      - { key: Jan, value: 100 }
      - { key: Feb, value: 80 }
      - { key: Mar, value: 130 }
      - { key: Apr, value: 70 }
"##;

fn band_center(chart: &mut ChartInstance, index: usize) -> Point {
    let layout = chart.layout();
    let plot = layout.plot;
    let step = plot.width / layout.index_count as f32;
    Point::new(plot.x + step * (index as f32 + 0.5), plot.y + plot.height / 2.0)
}

#[test]
fn test_hover_tooltip_and_teardown() {
    let mut chart = chartkit::from_yaml(REVENUE_YAML).unwrap();
    assert_eq!(chart.layout().commands_of(DrawKind::Rect).count(), 8);

    let position = band_center(&mut chart, 2);
    assert!(chart.handle_event(&Event::PointerMove { position }, 0));
    assert_eq!(chart.tooltip_state(), TooltipState::ActiveAtIndex(2));
    assert_eq!(chart.active_index(), Some(2));

    let rows = chart
        .render_tooltip(2, |c| {
            c.rows.iter().map(|r| (r.series.clone(), r.formatted.clone())).collect::<Vec<_>>()
        })
        .unwrap();
    assert_eq!(rows, vec![
        ("2024".to_string(), "$150".to_string()),
        ("2023".to_string(), "$130".to_string()),
    ]);

    chart.handle_event(&Event::Unmount, 0);
    assert!(chart.is_detached());
    assert!(!chart.handle_event(&Event::PointerMove { position }, 1));
}

#[test]
fn test_keyboard_walks_categories() {
    let mut chart = chartkit::from_yaml(REVENUE_YAML).unwrap();
    chart.handle_event(&Event::KeyDown { key: Key::End }, 0);
    assert_eq!(chart.active_index(), Some(3));
    chart.handle_event(&Event::KeyDown { key: Key::ArrowRight }, 0);
    assert_eq!(chart.active_index(), Some(3));
    chart.handle_event(&Event::KeyDown { key: Key::ArrowLeft }, 0);
    assert_eq!(chart.active_index(), Some(2));
    chart.handle_event(&Event::KeyDown { key: Key::Home }, 0);
    assert_eq!(chart.active_index(), Some(0));
    chart.handle_event(&Event::KeyDown { key: Key::Escape }, 0);
    assert_eq!(chart.active_index(), None);
}

#[test]
fn test_renderer_receives_json() {
    let mut chart = chartkit::from_yaml(REVENUE_YAML).unwrap();
    let json = chartkit::commands_to_json(chart.layout()).unwrap();
    let commands = chartkit::commands_from_json(&json).unwrap();
    assert_eq!(commands.len(), chart.layout().commands.len());
}
