//! Parser for native declarations using syn
//!
//! Declarations are `extern "C"` blocks whose functions carry a
//! `#[native(namespace, hash)]` attribute:
//!
//! ```ignore
//! extern "C" {
//!     /// Gets the current coordinates of an entity.
//!     #[native(0x00000000, 0x1647f1cb)]
//!     pub fn get_entity_coords(entity: i32) -> Ret<Vector>;
//! }
//! ```

use anyhow::{Context, Result, bail};
use quote::ToTokens;
use std::collections::HashSet;
use std::path::Path;
use syn::punctuated::Punctuated;
use syn::{
    FnArg, ForeignItem, ForeignItemFn, GenericArgument, Item, LitInt, Pat, PathArguments,
    ReturnType, Token, Type as SynType,
};

use crate::model::{
    Category, NativeFunction, NativeModel, Output, OutputKind, OutputRole, ParamType, Parameter,
};

/// Files that don't contribute declarations.
const SKIP_FILES: &[&str] = &["mod.rs"];

/// Parse every declaration file in `dir` into one model.
///
/// Each file stem becomes the category of the natives it declares. Files
/// are read in name order so the output is deterministic.
pub fn parse_native_dir(dir: impl AsRef<Path>) -> Result<NativeModel> {
    let dir = dir.as_ref();

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.ends_with(".rs") && !SKIP_FILES.contains(&name.as_str())
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut model = NativeModel {
        natives: Vec::new(),
        categories: Vec::new(),
    };

    for entry in entries {
        let file_path = entry.path();
        let stem = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .with_context(|| format!("Invalid file name {}", file_path.display()))?;

        let content = std::fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        let file_model = parse_native_source(&content, &prettify_category(&stem))
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;

        model.natives.extend(file_model.natives);
        model.categories.extend(file_model.categories);
    }

    check_unique(&model)?;
    Ok(model)
}

/// Parse one declaration source; every native gets `category`.
pub fn parse_native_source(source: &str, category: &str) -> Result<NativeModel> {
    let file = syn::parse_file(source)
        .context("Failed to parse Rust source")?;

    let mut natives = Vec::new();
    for item in &file.items {
        if let Item::ForeignMod(foreign_mod) = item {
            for foreign in &foreign_mod.items {
                if let ForeignItem::Fn(func) = foreign {
                    natives.push(parse_native_function(func, category)?);
                }
            }
        }
    }

    let categories = if natives.is_empty() {
        Vec::new()
    } else {
        vec![Category {
            name: category.to_string(),
            comment: extract_doc_comments(&file.attrs),
        }]
    };

    let model = NativeModel {
        natives,
        categories,
    };
    check_unique(&model)?;
    Ok(model)
}

/// Prettify a file stem: "player_state" -> "Player State".
fn prettify_category(stem: &str) -> String {
    stem.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_native_function(func: &ForeignItemFn, category: &str) -> Result<NativeFunction> {
    let name = func.sig.ident.to_string();
    let (namespace, hash) = parse_native_attr(func)
        .with_context(|| format!("native `{}`", name))?;

    let mut params = Vec::new();
    for input in &func.sig.inputs {
        let FnArg::Typed(pat_type) = input else {
            bail!("native `{}` cannot take `self`", name);
        };
        let param_name = match &*pat_type.pat {
            Pat::Ident(ident) => ident.ident.to_string(),
            _ => bail!("native `{}` has a parameter that is not a plain name", name),
        };
        let ty = parse_param_type(&pat_type.ty)
            .with_context(|| format!("native `{}`, parameter `{}`", name, param_name))?;
        params.push(Parameter {
            name: param_name,
            ty,
        });
    }

    let outputs = match &func.sig.output {
        ReturnType::Default => Vec::new(),
        ReturnType::Type(_, ty) => parse_outputs(ty)
            .with_context(|| format!("native `{}` return type", name))?,
    };

    check_in_out_prefix(&name, &params, &outputs)?;

    Ok(NativeFunction {
        name,
        namespace,
        hash,
        params,
        outputs,
        doc_comment: extract_doc_comments(&func.attrs),
        category: category.to_string(),
    })
}

/// Read `#[native(namespace, hash)]`.
fn parse_native_attr(func: &ForeignItemFn) -> Result<(u32, u32)> {
    let attr = func
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("native"))
        .context("missing #[native(namespace, hash)] attribute")?;

    let args = attr
        .parse_args_with(Punctuated::<LitInt, Token![,]>::parse_terminated)
        .context("expected #[native(namespace, hash)]")?;
    let values: Vec<u32> = args
        .iter()
        .map(|lit| lit.base10_parse::<u32>())
        .collect::<syn::Result<_>>()
        .context("namespace and hash must be 32-bit integers")?;

    match values.as_slice() {
        [namespace, hash] => Ok((*namespace, *hash)),
        _ => bail!("expected exactly two values in #[native(namespace, hash)]"),
    }
}

fn parse_param_type(ty: &SynType) -> Result<ParamType> {
    match ty {
        SynType::Reference(reference) => match &*reference.elem {
            SynType::Path(path) if path.path.is_ident("str") => Ok(ParamType::Str),
            _ => bail!("only `&str` references are supported"),
        },
        SynType::Path(type_path) => {
            let segment = type_path.path.segments.last().context("empty type path")?;
            let ident = segment.ident.to_string();

            if ident == "InOut" {
                return match single_generic_ident(&segment.arguments)?.as_str() {
                    "i32" => Ok(ParamType::InOutInt),
                    "f32" => Ok(ParamType::InOutFloat),
                    other => bail!("unsupported in/out type `InOut<{}>`", other),
                };
            }

            ParamType::from_ident(&ident)
                .with_context(|| format!("unsupported parameter type `{}`", ident))
        }
        other => bail!("unsupported parameter type `{}`", other.to_token_stream()),
    }
}

fn parse_outputs(ty: &SynType) -> Result<Vec<Output>> {
    match ty {
        SynType::Tuple(tuple) => tuple.elems.iter().map(parse_marker).collect(),
        other => Ok(vec![parse_marker(other)?]),
    }
}

/// Parse `Ret<Kind>` or `Out<Kind>`.
fn parse_marker(ty: &SynType) -> Result<Output> {
    let SynType::Path(type_path) = ty else {
        bail!(
            "outputs must be `Ret<Kind>` or `Out<Kind>`, found `{}`",
            ty.to_token_stream()
        );
    };
    let segment = type_path.path.segments.last().context("empty type path")?;

    let role = match segment.ident.to_string().as_str() {
        "Ret" => OutputRole::Return,
        "Out" => OutputRole::Pointer,
        other => bail!("unknown output marker `{}`", other),
    };
    let kind_ident = single_generic_ident(&segment.arguments)?;
    let kind = OutputKind::from_ident(&kind_ident)
        .with_context(|| format!("unknown output kind `{}`", kind_ident))?;

    Ok(Output { role, kind })
}

/// The last path segment of the only generic argument: `X<kind::Int>` -> "Int".
fn single_generic_ident(arguments: &PathArguments) -> Result<String> {
    let PathArguments::AngleBracketed(args) = arguments else {
        bail!("expected one generic argument");
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(SynType::Path(path)) => path.path.segments.last(),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(segment), None) if args.args.len() == 1 => Ok(segment.ident.to_string()),
        _ => bail!("expected one generic argument"),
    }
}

/// In/out parameters place their markers while arguments are encoded, so
/// they must be the leading outputs, in parameter order and of matching
/// kind.
fn check_in_out_prefix(name: &str, params: &[Parameter], outputs: &[Output]) -> Result<()> {
    let in_out: Vec<(&str, OutputKind)> = params
        .iter()
        .filter_map(|p| p.ty.in_out_kind().map(|kind| (p.name.as_str(), kind)))
        .collect();

    for (index, (param, kind)) in in_out.iter().enumerate() {
        let expected = Output {
            role: OutputRole::Pointer,
            kind: *kind,
        };
        if outputs.get(index) != Some(&expected) {
            bail!(
                "native `{}`: in/out parameter `{}` must match output {} ({})",
                name,
                param,
                index,
                expected.marker()
            );
        }
    }
    Ok(())
}

fn check_unique(model: &NativeModel) -> Result<()> {
    let mut names = HashSet::new();
    let mut ids = HashSet::new();
    for native in &model.natives {
        if !names.insert(native.name.as_str()) {
            bail!("native `{}` is declared twice", native.name);
        }
        if !ids.insert((native.namespace, native.hash)) {
            bail!(
                "native `{}` reuses id 0x{:08x}:0x{:08x}",
                native.name,
                native.namespace,
                native.hash
            );
        }
    }
    Ok(())
}

/// Extract documentation comments from attributes
fn extract_doc_comments(attrs: &[syn::Attribute]) -> String {
    let mut doc = String::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let syn::Meta::NameValue(meta) = &attr.meta
            && let syn::Expr::Lit(expr_lit) = &meta.value
            && let syn::Lit::Str(lit_str) = &expr_lit.lit
        {
            if !doc.is_empty() {
                doc.push('\n');
            }
            doc.push_str(lit_str.value().trim());
        }
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<NativeModel> {
        parse_native_source(source, "Vehicles")
    }

    #[test]
    fn test_parse_simple_native() {
        let source = r#"
            //! Vehicle natives

            extern "C" {
                /// Returns the primary and secondary colour.
                #[native(0x00000000, 0x40d82d88)]
                pub fn get_vehicle_colours(vehicle: i32) -> (Out<Int>, Out<Int>);
            }
        "#;

        let model = parse(source).unwrap();
        assert_eq!(model.natives.len(), 1);
        assert_eq!(model.categories[0].name, "Vehicles");
        assert_eq!(model.categories[0].comment, "Vehicle natives");

        let native = &model.natives[0];
        assert_eq!(native.name, "get_vehicle_colours");
        assert_eq!(native.namespace, 0);
        assert_eq!(native.hash, 0x40d82d88);
        assert_eq!(
            native.doc_comment,
            "Returns the primary and secondary colour."
        );
        assert_eq!(
            native.params,
            vec![Parameter {
                name: "vehicle".to_string(),
                ty: ParamType::Int {
                    rust_type: "i32".to_string()
                },
            }]
        );
        assert_eq!(native.output_set(), "(Out<kind::Int>, Out<kind::Int>)");
    }

    #[test]
    fn test_parse_param_shapes() {
        let source = r#"
            extern "C" {
                #[native(0, 1)]
                pub fn everything(
                    a: &str,
                    b: f32,
                    c: bool,
                    d: Vector3,
                    e: Hash,
                    f: FuncRef,
                    g: Object,
                    h: u64,
                );
            }
        "#;

        let model = parse(source).unwrap();
        let types: Vec<_> = model.natives[0]
            .params
            .iter()
            .map(|p| p.ty.wrapper_type().to_string())
            .collect();
        assert_eq!(
            types,
            [
                "&str",
                "f32",
                "bool",
                "Vector3",
                "&str",
                "&CallbackHandle",
                "&StructuredObject",
                "u64"
            ]
        );
        assert!(model.natives[0].outputs.is_empty());
    }

    #[test]
    fn test_qualified_kind_paths() {
        let source = r#"
            extern "C" {
                #[native(0, 0x1647f1cb)]
                pub fn get_entity_coords(entity: i32) -> Ret<kind::Vector>;
            }
        "#;
        let model = parse(source).unwrap();
        assert_eq!(model.natives[0].value_type(), "Vector3");
    }

    #[test]
    fn test_in_out_must_lead_outputs() {
        let valid = r#"
            extern "C" {
                #[native(0, 0xa0dbd08d)]
                pub fn get_vehicle_dashboard_colour(vehicle: i32, color: InOut<i32>) -> Out<Int>;
            }
        "#;
        let model = parse(valid).unwrap();
        assert_eq!(model.natives[0].params[1].ty, ParamType::InOutInt);

        let mismatched = r#"
            extern "C" {
                #[native(0, 0xa0dbd08d)]
                pub fn get_vehicle_dashboard_colour(color: InOut<f32>) -> Out<Int>;
            }
        "#;
        assert!(parse(mismatched).is_err());

        let missing = r#"
            extern "C" {
                #[native(0, 0xd8c3c1cd)]
                pub fn remove_blip(blip: InOut<i32>);
            }
        "#;
        assert!(parse(missing).is_err());
    }

    #[test]
    fn test_rejects_bad_declarations() {
        let no_attr = r#"extern "C" { pub fn f(); }"#;
        assert!(parse(no_attr).is_err());

        let one_value = r#"extern "C" { #[native(1)] pub fn f(); }"#;
        assert!(parse(one_value).is_err());

        let too_wide = r#"extern "C" { #[native(0, 0x1_0000_0000)] pub fn f(); }"#;
        assert!(parse(too_wide).is_err());

        let bad_type = r#"extern "C" { #[native(0, 1)] pub fn f(s: String); }"#;
        assert!(parse(bad_type).is_err());

        let bad_marker = r#"extern "C" { #[native(0, 1)] pub fn f() -> i32; }"#;
        assert!(parse(bad_marker).is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let source = r#"
            extern "C" {
                #[native(0, 1)]
                pub fn a();
                #[native(0, 1)]
                pub fn b();
            }
        "#;
        assert!(parse(source).is_err());
    }

    #[test]
    fn test_prettify_category() {
        assert_eq!(prettify_category("vehicles"), "Vehicles");
        assert_eq!(prettify_category("routing_buckets"), "Routing Buckets");
    }

    #[test]
    fn test_parse_dir_orders_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("players.rs"),
            r#"extern "C" { #[native(0, 2)] pub fn get_player_name(player: &str) -> Ret<Str>; }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("blips.rs"),
            r#"extern "C" { #[native(0, 1)] pub fn remove_blip(blip: InOut<i32>) -> Out<Int>; }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let model = parse_native_dir(dir.path()).unwrap();
        let names: Vec<_> = model.natives.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["remove_blip", "get_player_name"]);
        let categories: Vec<_> = model.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(categories, ["Blips", "Players"]);
    }
}
