//! Integration tests for the extract, resolve, rewrite and emit pipeline.

use snowcss_core::functions::FUNCTION_NAMES;
use snowcss_core::prelude::*;
use snowcss_core::values::{AbsoluteValue, ColorValue, RelativeValue, parse_values};

fn config() -> Config {
    let tokens = TokenTable::new()
        .with(
            "colors",
            TokenTable::new()
                .with("primary", "#ff0000")
                .with("accent", "rgb(0, 128, 255)")
                .with("gray", TokenTable::new().with("50", "#fafafa")),
        )
        .with(
            "space",
            TokenTable::new()
                .with("0.5", "2px")
                .with("md", "16px")
                .with("lg", "1.5rem")
                .with("inset", "1px 2px 3px 4px"),
        )
        .with("font", TokenTable::new().with("sans", "'Inter', sans-serif"));

    Config::new(UserConfig::new(tokens)).unwrap()
}

fn compile(config: &Config, css: &str) -> (String, Diagnostics) {
    let (calls, mut diagnostics) = extract(css);
    let (resolved, resolve_diagnostics) = resolve(config, &calls);
    diagnostics.merge(resolve_diagnostics);
    (replace(css, &resolved), diagnostics)
}

#[test]
fn path_roundtrip() {
    for input in ["colors.primary", "size.0.5", "a.b.c", "spacing.1.5.x"] {
        assert_eq!(Path::from_dot_path(input).to_dot_path(), input);
    }
    assert_eq!(Path::from_dot_path("size.0.5").segments(), ["size", "0.5"]);
    assert_eq!(Path::from_dot_path("a.b.c").segments(), ["a", "b", "c"]);
}

#[test]
fn unit_conversions() {
    let ctx = ModifyContext {
        root_font_size: 16.0,
    };
    assert_eq!(
        AbsoluteValue::new("32px", 32.0)
            .apply(&Modifier::unit(Unit::Rem), &ctx)
            .as_deref(),
        Some("2rem")
    );
    assert_eq!(
        RelativeValue::new("2rem", 2.0, "rem")
            .apply(&Modifier::unit(Unit::Px), &ctx)
            .as_deref(),
        Some("32px")
    );
}

#[test]
fn alpha_on_hex_color() {
    let values = parse_values("#ff0000");
    let color: &ColorValue = values[0].as_color().unwrap();
    let css = color
        .apply(&Modifier::alpha(0.5), &ModifyContext::default())
        .unwrap();

    assert_eq!(css.len(), 9);
    assert!(css.starts_with("#ff0000"));
    assert_eq!(&css[7..], "80");
}

#[test]
fn token_and_value_calls() {
    let (output, diagnostics) = compile(
        &config(),
        ".a { color: --token(\"colors.primary\"); background: --value(\"colors.primary\"); }",
    );

    assert!(diagnostics.is_empty());
    assert_eq!(
        output,
        ".a { color: var(--colors-primary); background: #ff0000; }"
    );
}

#[test]
fn missing_token_warns_without_failing() {
    let (calls, _) = extract(".a { color: --value(\"colors.nope\"); }");
    let (resolved, diagnostics) = resolve(&config(), &calls);

    assert!(resolved.is_empty());
    assert!(diagnostics.count(DiagnosticSeverity::Warning) >= 1);
    assert!(!diagnostics.has_errors());
}

#[test]
fn modifier_on_multi_value_token() {
    let (output, diagnostics) = compile(
        &config(),
        ".a { padding: --value(\"space.inset\" to rem); }",
    );

    assert_eq!(output, ".a { padding: 1px 2px 3px 4px; }");
    assert!(!diagnostics.is_empty());
}

#[test]
fn modifiers_in_a_document() {
    let css = "\
.card {
  padding: --value(\"space.md\" to rem);
  margin: --value(\"space.lg\" to px) --value(\"space.0.5\" negate);
  color: --value(\"colors.accent\" / 25%);
  border-color: --value('colors.gray.50' / 10%);
}";
    let (output, diagnostics) = compile(&config(), css);

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        output,
        "\
.card {
  padding: 1rem;
  margin: 24px -2px;
  color: rgba(0, 128, 255, 0.25);
  border-color: #fafafa1a;
}"
    );
}

#[test]
fn custom_property_values_are_rewritten() {
    let css = ":root {\n  --brand: --token(\"colors.primary\");\n  --gap: calc(--value(\"space.md\") * 2);\n}";
    let (output, diagnostics) = compile(&config(), css);

    assert!(diagnostics.is_empty());
    assert_eq!(
        output,
        ":root {\n  --brand: var(--colors-primary);\n  --gap: calc(16px * 2);\n}"
    );
}

#[test]
fn diagnostics_are_ordered_extraction_first() {
    let css = ".a { color: --value(\"colors.nope\"); margin: --token(space); }";
    let (_, diagnostics) = compile(&config(), css);

    let contexts: Vec<Option<&str>> = diagnostics.iter().map(Diagnostic::context).collect();
    assert_eq!(contexts, [Some("parser"), Some("resolver")]);
}

#[test]
fn roundtrip_leaves_no_reserved_calls() {
    let css = "\
@media (min-width: 40rem) {
  .a { font-family: --value(\"font.sans\"); gap: --value(\"space.md\" to rem); }
}
.b { color: --token(\"colors.gray.50\"); --x: --value(\"colors.primary\" / 50%); }";
    let (output, diagnostics) = compile(&config(), css);

    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.count(DiagnosticSeverity::Warning), 0);
    for name in FUNCTION_NAMES {
        assert!(!output.contains(name), "{name} left in {output}");
    }
    assert!(output.contains("font-family: 'Inter', sans-serif;"));
}

#[test]
fn emit_whole_table() {
    let config = config();
    let (resolved, diagnostics) = resolve_all(&config);
    assert!(diagnostics.is_empty());
    assert_eq!(resolved.len(), config.len());

    let pretty = emit(&resolved, EmitOptions::default()).unwrap();
    assert!(pretty.starts_with(":root {\n"));
    assert!(pretty.contains("\n  --colors-primary: #ff0000;\n"));
    assert!(pretty.contains("\n  --space-0\\.5: 2px;\n"));
    assert!(pretty.ends_with("\n}"));

    let minified = emit(&resolved, EmitOptions::minified()).unwrap();
    assert!(!minified.contains('\n'));
    assert!(minified.contains("--colors-primary:#ff0000;"));

    assert_eq!(emit(&[], EmitOptions::default()), None);
}

#[test]
fn prefixed_config() {
    let tokens = TokenTable::new().with("colors", TokenTable::new().with("primary", "#ff0000"));
    let config = Config::new(UserConfig::new(tokens).with_prefix("app")).unwrap();

    let (output, diagnostics) = compile(&config, ".a { color: --token(\"colors.primary\"); }");
    assert!(diagnostics.is_empty());
    assert_eq!(output, ".a { color: var(--app-colors-primary); }");

    let css = emit(&resolve_all(&config).0, EmitOptions::minified()).unwrap();
    assert_eq!(css, ":root{--app-colors-primary:#ff0000;}");
}

#[test]
fn at_rule_is_replaced_with_emitted_tokens() {
    let config = config();
    let css = "@snowcss;\nbody { color: --token(\"colors.primary\"); }";

    let (at_rules, diagnostics) = extract_at_rules(css);
    assert!(diagnostics.is_empty());
    assert_eq!(at_rules.len(), 1);

    let tokens = emit(&resolve_all(&config).0, EmitOptions::minified()).unwrap();
    let output = replace_at_rule(css, &at_rules[0], &tokens);
    assert!(output.starts_with(":root{--colors-primary:#ff0000;"));
    assert!(output.ends_with("body { color: --token(\"colors.primary\"); }"));
}
