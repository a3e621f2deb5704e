#![cfg(feature = "serde")]
#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use serde_json::json;
use std::error::Error;
use xmldict::{parse, parse_with_config, Config, TextMode, Value};

type TestResult = Result<(), Box<dyn Error>>;

fn to_json(input: &str) -> Result<serde_json::Value, Box<dyn Error>> {
    Ok(serde_json::to_value(parse(input)?)?)
}

fn to_json_with(input: &str, config: &Config) -> Result<serde_json::Value, Box<dyn Error>> {
    Ok(serde_json::to_value(parse_with_config(input, config)?)?)
}

const GRADIENT_SVG: &str = r#"<svg width="200" height="100" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="gradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" style="stop-color:rgb(255,255,0);stop-opacity:1" />
      <stop offset="100%" style="stop-color:rgb(255,0,0);stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="200" height="100" fill="url(#gradient)" />
</svg>"#;

const SHAPES_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400">
  <rect x="50" y="50" width="100" height="50" fill="blue" />
  <circle cx="200" cy="100" r="50" fill="red" />
  <ellipse cx="350" cy="75" rx="50" ry="25" fill="green" />
  <line x1="50" y1="200" x2="150" y2="300" stroke="orange" />
  <polyline points="200,200 250,250 300,200 350,250" fill="none" stroke="purple" />
  <polygon points="350,200 400,250 400,150" fill="yellow" />
  <path d="M50,350 L100,350 Q125,375 150,350 T200,350" fill="none" stroke="black"/>

  <rect x="10" y="10" height="100" width="100"
        style="stroke:#ff0000; fill: #0000ff"/>
        <path d="M50,350 L100,350 Q125,375 150,350 T200,350" fill="none" stroke="black"/><polygon points="350,200 400,250 400,150" fill="yellow" />


  <circle cx="200" cy="100" r="50" fill="red"></circle>

  <polygon points="350,200 400,250 400,150" fill="yellow" />
</svg>"#;

const NESTED_GROUPS_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200">
  <rect x="10" y="10" width="180" height="180" fill="lightgray" />

  <g transform="translate(100,100)">
    <circle cx="0" cy="0" r="80" fill="blue" />

    <g transform="translate(-40,-40)">
      <rect x="0" y="0" width="80" height="80" fill="red" />
      <text x="40" y="60" text-anchor="middle" fill="white">Nested</text>
    </g>
  </g>
</svg>"#;

#[test]
fn test_empty_document() -> TestResult {
    assert_eq!(to_json("")?, json!({}));
    assert_eq!(parse("")?, Value::default());
    Ok(())
}

#[test]
fn test_simple_elements() -> TestResult {
    assert_eq!(to_json("<p/>")?, json!({"p": {}}));
    assert_eq!(to_json("<p></p>")?, json!({"p": {}}));
    assert_eq!(parse("<p/>")?, parse("<p></p>")?);
    Ok(())
}

#[test]
fn test_attributes() -> TestResult {
    assert_eq!(
        to_json(r#"<p width="10"></p>"#)?,
        json!({"p": {"@width": "10"}})
    );
    assert_eq!(
        to_json(r#"<p width="10" height="20"></p>"#)?,
        json!({"p": {"@width": "10", "@height": "20"}})
    );
    assert_eq!(
        to_json(r#"<p width="10" height="20"/>"#)?,
        json!({"p": {"@width": "10", "@height": "20"}})
    );
    assert_eq!(
        to_json(r#"<p width = "10"  height = "20"/>"#)?,
        json!({"p": {"@width": "10", "@height": "20"}})
    );
    assert_eq!(to_json("<p w='1'/>")?, json!({"p": {"@w": "1"}}));
    Ok(())
}

#[test]
fn test_text_and_attributes_coexist() -> TestResult {
    assert_eq!(
        to_json(r#"<p width="10">Hello World</p>"#)?,
        json!({"p": {"@width": "10", "#text": "Hello World"}})
    );
    assert_eq!(
        to_json(r#"<p w="10">Hi</p>"#)?,
        json!({"p": {"@w": "10", "#text": "Hi"}})
    );
    Ok(())
}

#[test]
fn test_whitespace_only_text_dropped() -> TestResult {
    assert_eq!(to_json("<p>   </p>")?, json!({"p": {}}));
    assert_eq!(to_json("<p>\n\t\n</p>")?, json!({"p": {}}));
    Ok(())
}

#[test]
fn test_text_is_trimmed() -> TestResult {
    assert_eq!(
        to_json("<p>\n   Hello   World \n</p>")?,
        json!({"p": {"#text": "Hello   World"}})
    );
    Ok(())
}

#[test]
fn test_entities_pass_through() -> TestResult {
    assert_eq!(
        to_json(r#"<p title="a &amp; b">x &lt; y</p>"#)?,
        json!({"p": {"@title": "a &amp; b", "#text": "x &lt; y"}})
    );
    Ok(())
}

#[test]
fn test_interleaved_text_last_run_wins() -> TestResult {
    assert_eq!(
        to_json("<p>Hey <b>bold</b>There</p>")?,
        json!({"p": {"#text": "There", "b": {"#text": "bold"}}})
    );
    Ok(())
}

#[test]
fn test_interleaved_text_concat() -> TestResult {
    let config = Config::default().with_text_mode(TextMode::Concat);
    assert_eq!(
        to_json_with("<p>Hey <b>bold</b>There</p>", &config)?,
        json!({"p": {"#text": "HeyThere", "b": {"#text": "bold"}}})
    );
    Ok(())
}

#[test]
fn test_nested() -> TestResult {
    assert_eq!(to_json("<book><p/></book> ")?, json!({"book": {"p": {}}}));
    assert_eq!(to_json("<book><p></p></book>")?, json!({"book": {"p": {}}}));
    assert_eq!(
        to_json("<book><p></p></book><card/>")?,
        json!({"book": {"p": {}}, "card": {}})
    );
    assert_eq!(
        to_json("<pizza></pizza><book><p></p></book><card/>")?,
        json!({"pizza": {}, "book": {"p": {}}, "card": {}})
    );
    Ok(())
}

#[test]
fn test_list_promotion() -> TestResult {
    let xml_items = r#"<items>
  <item id="1"></item>
  <item id="2"></item>
  <item id="3"></item>
</items>"#;
    assert_eq!(
        to_json(xml_items)?,
        json!({"items": {"item": [{"@id": "1"}, {"@id": "2"}, {"@id": "3"}]}})
    );
    assert_eq!(
        to_json("<items><item id='1'/><item id='2'/><item id='3'/></items>")?,
        json!({"items": {"item": [{"@id": "1"}, {"@id": "2"}, {"@id": "3"}]}})
    );
    Ok(())
}

#[test]
fn test_single_child_is_not_a_list() -> TestResult {
    let value = parse("<items><item id='1'/></items>")?;
    let item = value.get("items").and_then(|items| items.get("item"));
    assert!(item.is_some_and(Value::is_object));
    Ok(())
}

#[test]
fn test_comment() -> TestResult {
    assert_eq!(to_json("<!-- simple comment -->")?, json!({}));
    assert_eq!(to_json("<!-- x --><p/>")?, json!({"p": {}}));
    let comment = "<world>
  <!-- $comment+++@python -->
  <lake>Content</lake>
</world>";
    assert_eq!(
        to_json(comment)?,
        json!({"world": {"lake": {"#text": "Content"}}})
    );
    Ok(())
}

#[test]
fn test_doctype_and_declaration_skipped() -> TestResult {
    let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg>
<svg width="1"/>"#;
    assert_eq!(to_json(doc)?, json!({"svg": {"@width": "1"}}));
    Ok(())
}

#[test]
fn test_cdata_as_text() -> TestResult {
    let config = Config::default().with_cdata_as_text(true);
    assert_eq!(
        to_json_with(
            "<content><![CDATA[<p>This is a paragraph</p>]]></content>",
            &config
        )?,
        json!({"content": {"#text": "<p>This is a paragraph</p>"}})
    );
    Ok(())
}

#[test]
fn test_cdata_without_markup_is_opaque_by_default() -> TestResult {
    assert_eq!(
        to_json("<content><![CDATA[plain]]></content>")?,
        json!({"content": {}})
    );
    Ok(())
}

#[test]
fn test_prefix() -> TestResult {
    let config = Config::default().with_attr_prefix("$");
    assert_eq!(to_json_with("<p></p>", &config)?, json!({"p": {}}));
    assert_eq!(
        to_json_with(r#"<p width="10"></p>"#, &config)?,
        json!({"p": {"$width": "10"}})
    );
    assert_eq!(
        to_json_with(r#"<p width="10" height="5"></p>"#, &config)?,
        json!({"p": {"$width": "10", "$height": "5"}})
    );
    assert_eq!(
        to_json_with(r#"<p w="1"/>"#, &config)?,
        json!({"p": {"$w": "1"}})
    );
    Ok(())
}

#[test]
fn test_empty_prefix_and_custom_text_key() -> TestResult {
    let config = Config::default()
        .with_attr_prefix("")
        .with_text_key("_text");
    assert_eq!(
        to_json_with(r#"<p w="1">body</p>"#, &config)?,
        json!({"p": {"w": "1", "_text": "body"}})
    );
    Ok(())
}

#[test]
fn test_gradient_svg() -> TestResult {
    assert_eq!(
        to_json(GRADIENT_SVG)?,
        json!({
            "svg": {
                "@height": "100",
                "@width": "200",
                "@xmlns": "http://www.w3.org/2000/svg",
                "defs": {
                    "linearGradient": {
                        "@id": "gradient",
                        "@x1": "0%",
                        "@x2": "100%",
                        "@y1": "0%",
                        "@y2": "0%",
                        "stop": [
                            {
                                "@offset": "0%",
                                "@style": "stop-color:rgb(255,255,0);stop-opacity:1",
                            },
                            {
                                "@offset": "100%",
                                "@style": "stop-color:rgb(255,0,0);stop-opacity:1",
                            },
                        ],
                    }
                },
                "rect": {"@fill": "url(#gradient)", "@height": "100", "@width": "200"},
            }
        })
    );
    Ok(())
}

#[test]
fn test_shapes_svg() -> TestResult {
    let polygon = json!({"@points": "350,200 400,250 400,150", "@fill": "yellow"});
    let path = json!({
        "@d": "M50,350 L100,350 Q125,375 150,350 T200,350",
        "@fill": "none",
        "@stroke": "black"
    });
    let circle = json!({"@cx": "200", "@cy": "100", "@r": "50", "@fill": "red"});

    assert_eq!(
        to_json(SHAPES_SVG)?,
        json!({
            "svg": {
                "@xmlns": "http://www.w3.org/2000/svg",
                "@width": "400",
                "@height": "400",
                "rect": [
                    {"@x": "50", "@y": "50", "@width": "100", "@height": "50", "@fill": "blue"},
                    {
                        "@x": "10",
                        "@y": "10",
                        "@height": "100",
                        "@width": "100",
                        "@style": "stroke:#ff0000; fill: #0000ff"
                    }
                ],
                "circle": [circle.clone(), circle],
                "ellipse": {"@cx": "350", "@cy": "75", "@rx": "50", "@ry": "25", "@fill": "green"},
                "line": {"@x1": "50", "@y1": "200", "@x2": "150", "@y2": "300", "@stroke": "orange"},
                "polyline": {
                    "@points": "200,200 250,250 300,200 350,250",
                    "@fill": "none",
                    "@stroke": "purple"
                },
                "polygon": [polygon.clone(), polygon.clone(), polygon],
                "path": [path.clone(), path]
            }
        })
    );
    Ok(())
}

#[test]
fn test_nested_groups_svg() -> TestResult {
    assert_eq!(
        to_json(NESTED_GROUPS_SVG)?,
        json!({
            "svg": {
                "@xmlns": "http://www.w3.org/2000/svg",
                "@width": "200",
                "@height": "200",
                "rect": {"@x": "10", "@y": "10", "@width": "180", "@height": "180", "@fill": "lightgray"},
                "g": {
                    "@transform": "translate(100,100)",
                    "circle": {"@cx": "0", "@cy": "0", "@r": "80", "@fill": "blue"},
                    "g": {
                        "@transform": "translate(-40,-40)",
                        "rect": {"@x": "0", "@y": "0", "@width": "80", "@height": "80", "@fill": "red"},
                        "text": {
                            "@x": "40",
                            "@y": "60",
                            "@text-anchor": "middle",
                            "@fill": "white",
                            "#text": "Nested"
                        }
                    }
                }
            }
        })
    );
    Ok(())
}

#[test]
fn test_key_order_follows_document() -> TestResult {
    let value = parse(SHAPES_SVG)?;
    let keys: Vec<_> = value
        .get("svg")
        .and_then(Value::as_object)
        .map(|svg| svg.keys().cloned().collect())
        .unwrap_or_default();
    assert_eq!(
        keys,
        vec![
            "@xmlns", "@width", "@height", "rect", "circle", "ellipse", "line", "polyline",
            "polygon", "path"
        ]
    );
    Ok(())
}

#[test]
fn test_lenient_mode_closes_dangling_elements() -> TestResult {
    let config = Config::default().lenient();
    assert_eq!(
        to_json_with("<svg><g><rect/>", &config)?,
        json!({"svg": {"g": {"rect": {}}}})
    );
    Ok(())
}

#[test]
fn test_display_output() -> TestResult {
    let value = parse(r#"<p w="10">Hi</p>"#)?;
    assert_eq!(value.to_string(), r##"{"p": {"@w": "10", "#text": "Hi"}}"##);
    Ok(())
}
