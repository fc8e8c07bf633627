//! Rust wrapper generator

use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;

use crate::model::{NativeFunction, NativeModel, OutputKind, OutputRole, ParamType};

/// Line width the output is laid out for (rustfmt's `max_width`).
const MAX_WIDTH: usize = 100;

/// Widest method chain kept on one line (rustfmt's `chain_width`).
const CHAIN_WIDTH: usize = 60;

const INDENT: &str = "    ";

const SEPARATOR: &str =
    "// =============================================================================";

/// Generate the wrapper module for one side (e.g. "server").
pub fn generate_rust_wrappers(model: &NativeModel, side: &str) -> Result<String> {
    let mut output = String::new();

    // Header comment
    writeln!(output, "// GENERATED FILE - DO NOT EDIT")?;
    writeln!(output, "// Source: natives/include/{}", side)?;
    writeln!(output, "// Generator: tools/native-gen")?;
    writeln!(output)?;

    write_imports(&mut output, model)?;

    let mut current_category = String::new();
    for native in &model.natives {
        if native.category != current_category {
            current_category = native.category.clone();
            writeln!(output, "{}", SEPARATOR)?;
            writeln!(output, "// {}", current_category)?;
            writeln!(output, "{}", SEPARATOR)?;
            writeln!(output)?;
        }

        write_native(&mut output, native)?;
    }

    Ok(output)
}

/// Import only what the wrappers use so the module compiles warning-free.
fn write_imports(output: &mut String, model: &NativeModel) -> Result<()> {
    let mut names = BTreeSet::from(["InvokeError", "Invoker", "NativeId"]);
    let mut needs_encode = false;

    for native in &model.natives {
        for param in &native.params {
            match param.ty {
                ParamType::Vector => {
                    names.insert("Vector3");
                }
                ParamType::Hash => needs_encode = true,
                ParamType::FuncRef => {
                    names.insert("CallbackHandle");
                }
                ParamType::Object => {
                    names.insert("StructuredObject");
                }
                _ => {}
            }
        }
        for out in &native.outputs {
            names.insert("kind");
            names.insert(match out.role {
                OutputRole::Return => "Ret",
                OutputRole::Pointer => "Out",
            });
            match out.kind {
                OutputKind::Vector => {
                    names.insert("Vector3");
                }
                OutputKind::Any => {
                    names.insert("RawSlot");
                }
                _ => {}
            }
        }
    }

    if needs_encode {
        writeln!(output, "use nativecall_core::encode;")?;
    }
    let names: Vec<&str> = names.into_iter().collect();
    let single = format!("use nativecall_core::{{{}}};", names.join(", "));
    if single.len() <= MAX_WIDTH {
        writeln!(output, "{}", single)?;
    } else {
        writeln!(output, "use nativecall_core::{{")?;
        for line in fill_lines(&names, INDENT) {
            writeln!(output, "{}", line)?;
        }
        writeln!(output, "}};")?;
    }
    writeln!(output)?;
    Ok(())
}

/// Pack `items` into comma-separated lines no wider than `MAX_WIDTH`,
/// each ending with a comma.
fn fill_lines(items: &[&str], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for item in items {
        let candidate = if current.is_empty() {
            format!("{}{},", indent, item)
        } else {
            format!("{} {},", current, item)
        };
        if candidate.len() > MAX_WIDTH && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current = format!("{}{},", indent, item);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn write_native(output: &mut String, native: &NativeFunction) -> Result<()> {
    let const_name = native.const_name();

    writeln!(output, "/// Identifier of [`{}`].", native.name)?;
    let head = format!("pub const {}: NativeId =", const_name);
    let value = format!(
        "NativeId::new(0x{:08x}, 0x{:08x});",
        native.namespace, native.hash
    );
    if head.len() + 1 + value.len() <= MAX_WIDTH {
        writeln!(output, "{} {}", head, value)?;
    } else {
        writeln!(output, "{}", head)?;
        writeln!(output, "{}{}", INDENT, value)?;
    }
    writeln!(output)?;

    for line in native.doc_comment.lines() {
        if line.is_empty() {
            writeln!(output, "///")?;
        } else {
            writeln!(output, "/// {}", line)?;
        }
    }

    write_signature(output, native)?;
    write_body(output, native, &const_name)?;
    writeln!(output, "}}")?;
    writeln!(output)?;

    Ok(())
}

/// `pub fn ...(...) -> Result<..> {`, one parameter per line when the
/// signature does not fit on one line.
fn write_signature(output: &mut String, native: &NativeFunction) -> Result<()> {
    let mut params = vec!["invoker: &Invoker".to_string()];
    params.extend(
        native
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name, param.ty.wrapper_type())),
    );
    let ret = format!("-> Result<{}, InvokeError> {{", native.value_type());

    let single = format!("pub fn {}({}) {}", native.name, params.join(", "), ret);
    if single.len() <= MAX_WIDTH {
        writeln!(output, "{}", single)?;
        return Ok(());
    }

    writeln!(output, "pub fn {}(", native.name)?;
    for param in &params {
        writeln!(output, "{}{},", INDENT, param)?;
    }
    writeln!(output, ") {}", ret)?;
    Ok(())
}

/// The builder chain, on one line when it is short enough.
fn write_body(output: &mut String, native: &NativeFunction, const_name: &str) -> Result<()> {
    let mut links = vec![format!(".invoke({})", const_name)];
    for param in &native.params {
        links.push(match param.ty {
            ParamType::Hash => format!(".arg(encode::hash({}))", param.name),
            ParamType::InOutInt => format!(".in_out_int({})", param.name),
            ParamType::InOutFloat => format!(".in_out_float({})", param.name),
            _ => format!(".arg({})", param.name),
        });
    }
    links.push(format!(".call::<{}>()", native.output_set()));

    let chain = format!("invoker{}", links.concat());
    if chain.len() <= CHAIN_WIDTH {
        writeln!(output, "{}{}", INDENT, chain)?;
        return Ok(());
    }

    writeln!(output, "{}invoker", INDENT)?;
    for link in &links {
        writeln!(output, "{}{}{}", INDENT, INDENT, link)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_native_source;

    const SOURCE: &str = r#"
        extern "C" {
            /// Creates a blip for the specified coordinates.
            #[native(0x00000000, 0xc6f43d0e)]
            pub fn add_blip_for_coord(coords: Vector3) -> Ret<Int>;

            /// Removes a blip.
            ///
            /// The handle is cleared on return.
            #[native(0x00000000, 0xd8c3c1cd)]
            pub fn remove_blip(blip: InOut<i32>) -> Out<Int>;

            #[native(0x00000000, 0xdd75460a)]
            pub fn create_vehicle(model: Hash, coords: Vector3) -> Ret<Int>;
        }
    "#;

    #[test]
    fn test_header_and_imports() {
        let model = parse_native_source(SOURCE, "Blips").unwrap();
        let code = generate_rust_wrappers(&model, "server").unwrap();

        let header = "// GENERATED FILE - DO NOT EDIT\n// Source: natives/include/server\n";
        assert!(code.starts_with(header));
        assert!(code.contains("use nativecall_core::encode;\n"));
        assert!(code.contains(
            "use nativecall_core::{InvokeError, Invoker, NativeId, Out, Ret, Vector3, kind};\n"
        ));
        assert!(code.contains("// Blips\n"));
    }

    #[test]
    fn test_wrapper_body() {
        let model = parse_native_source(SOURCE, "Blips").unwrap();
        let code = generate_rust_wrappers(&model, "server").unwrap();

        let expected = "\
/// Identifier of [`remove_blip`].
pub const REMOVE_BLIP: NativeId = NativeId::new(0x00000000, 0xd8c3c1cd);

/// Removes a blip.
///
/// The handle is cleared on return.
pub fn remove_blip(invoker: &Invoker, blip: i32) -> Result<i32, InvokeError> {
    invoker
        .invoke(REMOVE_BLIP)
        .in_out_int(blip)
        .call::<Out<kind::Int>>()
}
";
        assert!(code.contains(expected), "{code}");
        assert!(code.contains("        .arg(encode::hash(model))\n"));
    }

    #[test]
    fn test_short_chain_stays_on_one_line() {
        let source = r#"
            extern "C" {
                #[native(0x00000000, 0xa4ea0691)]
                pub fn get_game_timer() -> Ret<Long>;
            }
        "#;
        let model = parse_native_source(source, "Runtime").unwrap();
        let code = generate_rust_wrappers(&model, "server").unwrap();

        let expected = "\
pub fn get_game_timer(invoker: &Invoker) -> Result<u64, InvokeError> {
    invoker.invoke(GET_GAME_TIMER).call::<Ret<kind::Long>>()
}
";
        assert!(code.contains(expected), "{code}");
    }

    #[test]
    fn test_long_signature_wraps_parameters() {
        let source = r#"
            extern "C" {
                #[native(0x00000000, 0xdf70b41b)]
                pub fn set_entity_coords(
                    entity: i32,
                    coords: Vector3,
                    alive: bool,
                    dead_flag: bool,
                    ragdoll_flag: bool,
                    clear_area: bool,
                );
            }
        "#;
        let model = parse_native_source(source, "Entities").unwrap();
        let code = generate_rust_wrappers(&model, "server").unwrap();

        let expected = "\
pub fn set_entity_coords(
    invoker: &Invoker,
    entity: i32,
    coords: Vector3,
    alive: bool,
    dead_flag: bool,
    ragdoll_flag: bool,
    clear_area: bool,
) -> Result<(), InvokeError> {
    invoker
        .invoke(SET_ENTITY_COORDS)
";
        assert!(code.contains(expected), "{code}");
        assert!(code.lines().all(|line| line.len() <= MAX_WIDTH), "{code}");
    }

    #[test]
    fn test_long_import_list_wraps() {
        let items = ["InvokeError", "Invoker", "NativeId", "Out", "Ret"];
        let lines = fill_lines(&items, "    ");
        assert_eq!(lines, ["    InvokeError, Invoker, NativeId, Out, Ret,"]);

        let many: Vec<String> = (0..20).map(|i| format!("Item{i:02}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let lines = fill_lines(&many, "    ");
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= MAX_WIDTH && line.ends_with(','), "{line}");
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let model = parse_native_source(SOURCE, "Blips").unwrap();
        assert_eq!(
            generate_rust_wrappers(&model, "server").unwrap(),
            generate_rust_wrappers(&model, "server").unwrap()
        );
    }
}
