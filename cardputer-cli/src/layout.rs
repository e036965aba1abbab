//! Generate an HTML/SVG visualization of the Cardputer keymap, one grid per layer.

use cardputer_keymap::{key_at, lookup, KeyClass, Latch, ModifierLatches, COLS, ROWS};

/// Key unit size in SVG pixels.
const U: f64 = 54.0;
/// Gap between keys.
const GAP: f64 = 4.0;
/// Step: key + gap.
const S: f64 = U + GAP;
/// Key corner radius.
const R: f64 = 4.0;
/// Margin around the SVG content.
const MARGIN: f64 = 20.0;

/// The three layers and the latch state that selects each.
const LAYERS: [(&str, ModifierLatches); 3] = [
    (
        "Base",
        ModifierLatches {
            shift_held: false,
            function_held: false,
        },
    ),
    (
        "Shift",
        ModifierLatches {
            shift_held: true,
            function_held: false,
        },
    ),
    (
        "Fn",
        ModifierLatches {
            shift_held: false,
            function_held: true,
        },
    ),
];

/// What a key shows on one layer.
struct KeyFace {
    label: &'static str,
    class: &'static str,
}

fn key_face(row: usize, col: usize, layer: usize) -> KeyFace {
    let unused = KeyFace {
        label: "",
        class: "key unused",
    };
    let Some(key) = key_at(row, col) else {
        return unused;
    };
    let Some(mapping) = lookup(key) else {
        return unused;
    };

    match KeyClass::of(key) {
        KeyClass::Latch(Latch::Shift) => KeyFace {
            label: "Shift",
            class: "key latch",
        },
        KeyClass::Latch(Latch::Function) => KeyFace {
            label: "Fn",
            class: "key latch",
        },
        KeyClass::Hold => KeyFace {
            label: mapping.base.unwrap_or(""),
            class: "key modifier",
        },
        KeyClass::Regular => {
            let (_, latches) = LAYERS[layer];
            let own = match layer {
                0 => mapping.base,
                1 => mapping.shift,
                _ => mapping.function,
            };
            KeyFace {
                label: mapping.label(latches).unwrap_or(""),
                // Fell through to a lower layer.
                class: if own.is_some() { "key" } else { "key transparent" },
            }
        }
    }
}

/// Render a single layer as an SVG group.
fn render_layer(layer: usize, y_offset: f64) -> String {
    let mut svg = String::new();
    let (name, _) = LAYERS[layer];

    svg.push_str(&format!(
        r#"<g transform="translate({MARGIN}, {y_offset})">"#
    ));
    svg.push_str(&format!(
        r#"<text x="0" y="-10" class="layer-title">{name}</text>"#
    ));

    for row in 0..ROWS {
        for col in 0..COLS {
            let face = key_face(row, col, layer);
            let x = col as f64 * S;
            let y = row as f64 * S;

            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{U}" height="{U}" rx="{R}" class="{}"/>"#,
                face.class
            ));

            if !face.label.is_empty() {
                let font_class = if face.label.len() > 3 { " small" } else { "" };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" class="label{font_class}">{}</text>"#,
                    x + U / 2.0,
                    y + U / 2.0 + 1.0,
                    html_escape(face.label),
                ));
            }
        }
    }

    svg.push_str("</g>");
    svg
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Generate the complete HTML document with inline SVG.
pub fn generate_html() -> String {
    let content_w = COLS as f64 * S - GAP;
    let layer_height = ROWS as f64 * S + 60.0;
    let total_width = content_w + 2.0 * MARGIN;
    let total_height = LAYERS.len() as f64 * layer_height + 2.0 * MARGIN;

    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Cardputer Keymap</title>
<style>
  body {{
    background: #1a1a2e;
    color: #eee;
    font-family: system-ui, -apple-system, sans-serif;
    display: flex;
    justify-content: center;
    padding: 2em;
  }}
  .key {{
    fill: #16213e;
    stroke: #0f3460;
    stroke-width: 1.5;
  }}
  .key.unused {{
    fill: #0d1117;
    stroke: #21262d;
    stroke-dasharray: 3 3;
  }}
  .key.transparent {{
    fill: #1a1a2e;
    stroke: #30365e;
    stroke-dasharray: 2 2;
  }}
  .key.latch {{
    fill: #2d1b4e;
    stroke: #e94560;
    stroke-width: 2;
  }}
  .key.modifier {{
    fill: #1b2e4e;
    stroke: #53a8b6;
  }}
  .label {{
    fill: #eee;
    font-family: "JetBrains Mono", "Fira Code", monospace;
    font-size: 13px;
    text-anchor: middle;
    dominant-baseline: middle;
    pointer-events: none;
  }}
  .label.small {{
    font-size: 10px;
  }}
  .layer-title {{
    fill: #e94560;
    font-size: 16px;
    font-weight: bold;
  }}
</style>
</head>
<body>
<svg width="{total_width}" height="{total_height}" xmlns="http://www.w3.org/2000/svg">
"#
    );

    for layer in 0..LAYERS.len() {
        let y_offset = MARGIN + layer as f64 * layer_height + 30.0;
        html.push_str(&render_layer(layer, y_offset));
        html.push('\n');
    }

    html.push_str("</svg>\n</body>\n</html>\n");
    html
}
