use qml2carto::{
    from_xml_str, translate, translate_document, translate_input, translate_str, Body,
    Diagnostic, ErrorKind, Input, Options, StyleDocument, SymbolKind, SymbolLookup,
};

fn categorized(categories: &[(&str, &str)], symbols: &str) -> String {
    let categories: String = categories
        .iter()
        .map(|(symbol, value)| format!("<category symbol=\"{symbol}\" value=\"{value}\"/>"))
        .collect();
    format!(
        "<qgis><renderer-v2 type=\"categorizedSymbol\" attr=\"class\">\
         <categories>{categories}</categories><symbols>{symbols}</symbols>\
         </renderer-v2></qgis>"
    )
}

const FILL: &str = r#"<symbol name="f" type="fill"><layer>
    <prop k="color" v="10,20,30,255"/><prop k="color_border" v="0,0,0,255"/>
</layer></symbol>"#;

#[test]
fn test_blocks_follow_category_order() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(&[("f", "c"), ("f", "a"), ("f", "b")], FILL);
    let translation = translate_str(&xml, "zones")?;
    let Body::Scoped(blocks) = &translation.stylesheet.body else {
        return Err("expected selector blocks".into());
    };
    let values: Vec<&str> = blocks.iter().map(|b| b.selector.value.as_str()).collect();
    assert_eq!(values, ["c", "a", "b"]);
    assert!(blocks
        .iter()
        .all(|b| b.declarations == blocks[0].declarations));
    Ok(())
}

#[test]
fn test_category_value_with_entities() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(&[("f", "Fish &amp; Chips")], FILL);
    let text = translate_str(&xml, "food")?.text();
    assert!(text.contains("  [class=\"Fish & Chips\"] {\n"));
    Ok(())
}

#[test]
fn test_empty_categories() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(&[], FILL);
    assert_eq!(translate_str(&xml, "none")?.text(), ".none {\n}\n");
    Ok(())
}

#[test]
fn test_missing_property_reports_kind_and_symbol() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(
        &[("m", "x")],
        r#"<symbol name="m" type="marker"><layer><prop k="color" v="1,1,1,1"/></layer></symbol>"#,
    );
    let err = translate_str(&xml, "pts").err().ok_or("expected an error")?;
    assert_eq!(
        err.kind(),
        &ErrorKind::MissingProperty {
            key: "color_border".to_string(),
            kind: SymbolKind::Marker,
            symbol: "m".to_string(),
        }
    );
    assert_eq!(err.context(), Some("category \"x\""));
    Ok(())
}

#[test]
fn test_unsupported_symbol_type_is_structural() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(
        &[("r", "x")],
        r#"<symbol name="r" type="raster"><layer/></symbol>"#,
    );
    let err = translate_str(&xml, "r").err().ok_or("expected an error")?;
    assert!(matches!(err.kind(), ErrorKind::Structural { .. }));
    Ok(())
}

#[test]
fn test_strict_lookup_accepts_unique_names() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options {
        symbol_lookup: SymbolLookup::Strict,
        ..Options::default()
    };
    let xml = categorized(&[("f", "a")], FILL);
    let translation = translate_input(Input::from_str(&xml).with_name("s"), &options)?;
    assert_eq!(translation.stylesheet.block_count(), 1);
    Ok(())
}

#[test]
fn test_xml_limits_come_from_options() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options {
        xml: qml2carto::xml::Config::new(2, 0),
        ..Options::default()
    };
    let xml = categorized(&[("f", "a")], FILL);
    let err = translate_input(Input::from_str(&xml), &options)
        .err()
        .ok_or("expected an error")?;
    assert!(matches!(err.kind(), ErrorKind::MaxDepthExceeded { max: 2 }));
    Ok(())
}

#[test]
fn test_single_symbol_uses_first_symbol() -> Result<(), Box<dyn std::error::Error>> {
    let xml = r#"<qgis><renderer-v2 type="singleSymbol"><symbols>
        <symbol name="0" type="line"><layer><prop k="color" v="5,5,5,255"/><prop k="penstyle" v="dot"/></layer></symbol>
        <symbol name="1" type="fill"><layer/></symbol>
    </symbols></renderer-v2></qgis>"#;
    assert_eq!(
        translate_str(xml, "rivers")?.text(),
        ".rivers {\n    line-color: rgba(5,5,5,255);\n    line-dasharray: 1, 1;\n}\n"
    );
    Ok(())
}

#[test]
fn test_multi_layer_symbol_uses_first_layer() -> Result<(), Box<dyn std::error::Error>> {
    let xml = r#"<qgis><renderer-v2 type="singleSymbol"><symbols>
        <symbol name="0" type="line">
          <layer class="SimpleLine"><prop k="color" v="255,255,255,255"/><prop k="penstyle" v="solid"/><prop k="width" v="0.8"/></layer>
          <layer class="SimpleLine"><prop k="color" v="0,0,0,255"/><prop k="penstyle" v="solid"/><prop k="width" v="1.2"/></layer>
        </symbol>
    </symbols></renderer-v2></qgis>"#;
    let translation = translate_str(xml, "casing")?;
    assert_eq!(
        translation.text(),
        ".casing {\n    line-color: rgba(255,255,255,255);\n    line-width: 0.8;\n}\n"
    );
    assert_eq!(
        translation.diagnostics,
        vec![Diagnostic::ExtraLayers {
            symbol: "0".to_string(),
            count: 2,
        }]
    );
    Ok(())
}

#[test]
fn test_document_and_style_entry_points_agree() -> Result<(), Box<dyn std::error::Error>> {
    let xml = categorized(&[("f", "a"), ("f", "b")], FILL);
    let document = from_xml_str(&xml)?;
    let style = StyleDocument::from_xml(&document)?;
    let options = Options::default();
    assert_eq!(
        translate(&style, "same", &options)?,
        translate_document(&document, "same", &options)?
    );
    assert_eq!(
        translate_document(&document, "same", &options)?,
        translate_str(&xml, "same")?
    );
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_translation_serializes() -> Result<(), Box<dyn std::error::Error>> {
    let xml = r#"<qgis><renderer-v2 type="unknown-xyz"/></qgis>"#;
    let value = serde_json::to_value(translate_str(xml, "u")?)?;
    assert_eq!(value["stylesheet"]["name"], "u");
    assert_eq!(value["stylesheet"]["body"]["type"], "empty");
    assert_eq!(value["diagnostics"][0]["kind"], "unknown_renderer_type");
    assert_eq!(value["diagnostics"][0]["type_name"], "unknown-xyz");
    Ok(())
}
