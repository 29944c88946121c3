use crate::errors::Result;
use crate::model::{DataSource, Endpoint, Module, ParamLocation, SharedType};
use crate::render::file_tree::FileTree;

/// Renders accepted data sources into client source files
pub trait CodeGenerator: Send + Sync {
    /// # Errors
    /// Implementations fail when a source cannot be rendered.
    fn generate(&self, sources: &[DataSource], using_multiple_origins: bool) -> Result<FileTree>;
}

/// Built-in generator emitting TypeScript declaration files
///
/// Single origin: `baseClass.d.ts` and `api.d.ts` at the root. Multiple
/// origins: the same pair under one directory per source, namespaced by
/// source name, plus a root `api.d.ts` referencing each of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationGenerator;

pub const BASE_CLASS_FILE: &str = "baseClass.d.ts";
pub const API_FILE: &str = "api.d.ts";

impl CodeGenerator for DeclarationGenerator {
    fn generate(&self, sources: &[DataSource], using_multiple_origins: bool) -> Result<FileTree> {
        let mut tree = FileTree::new();

        if !using_multiple_origins && sources.len() == 1 {
            let ds = &sources[0];
            tree.add_file(BASE_CLASS_FILE, shared_types_declaration(ds, None));
            tree.add_file(API_FILE, modules_declaration(ds, None));
            return Ok(tree);
        }

        let mut references = Vec::new();
        for ds in sources {
            let mut dir = FileTree::new();
            dir.add_file(BASE_CLASS_FILE, shared_types_declaration(ds, Some(ds.name.as_str())));
            dir.add_file(API_FILE, modules_declaration(ds, Some(ds.name.as_str())));
            tree.add_dir(ds.name.clone(), dir);
            references.push(format!(
                "/// <reference path=\"./{}/{}\" />",
                ds.name, BASE_CLASS_FILE
            ));
            references.push(format!("/// <reference path=\"./{}/{}\" />", ds.name, API_FILE));
        }
        tree.add_file(API_FILE, references.join("\n") + "\n");
        Ok(tree)
    }
}

fn defs_namespace(origin: Option<&str>) -> String {
    match origin {
        Some(name) => format!("defs.{}", name),
        None => "defs".to_string(),
    }
}

/// Wrap `body` in `declare namespace <root> { ... }`, nesting one more
/// namespace per origin
fn wrap_namespace(root: &str, origin: Option<&str>, body: &str) -> String {
    match origin {
        Some(name) => format!(
            "declare namespace {} {{\n  export namespace {} {{\n{}  }}\n}}\n",
            root,
            name,
            indent(body, 4)
        ),
        None => format!("declare namespace {} {{\n{}}}\n", root, indent(body, 2)),
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "\n".to_string()
            } else {
                format!("{}{}\n", pad, line)
            }
        })
        .collect()
}

fn doc_comment(lines: &[&str]) -> String {
    let lines: Vec<&&str> = lines.iter().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let mut out = String::from("/**\n");
    for line in lines {
        out.push_str(&format!(" * {}\n", line));
    }
    out.push_str(" */\n");
    out
}

fn shared_types_declaration(ds: &DataSource, origin: Option<&str>) -> String {
    let defs_ns = defs_namespace(origin);
    let body: Vec<String> = ds
        .shared_types
        .iter()
        .map(|base| shared_type_declaration(base, &defs_ns))
        .collect();
    wrap_namespace("defs", origin, &body.join("\n"))
}

fn shared_type_declaration(base: &SharedType, defs_ns: &str) -> String {
    let mut out = doc_comment(&[base.description.as_str()]);
    if base.template_args.is_empty() {
        out.push_str(&format!("export class {} {{\n", base.name));
    } else {
        let params: Vec<String> = base
            .template_args
            .iter()
            .map(|arg| format!("{} = any", arg))
            .collect();
        out.push_str(&format!("export class {}<{}> {{\n", base.name, params.join(", ")));
    }
    for prop in &base.properties {
        out.push_str(&indent(&doc_comment(&[prop.description.as_str()]), 2));
        out.push_str(&format!(
            "  {}{}: {};\n",
            prop.name,
            if prop.required { "" } else { "?" },
            prop.data_type.render(defs_ns, &base.template_args)
        ));
    }
    out.push_str("}\n");
    out
}

fn modules_declaration(ds: &DataSource, origin: Option<&str>) -> String {
    let defs_ns = defs_namespace(origin);
    let body: Vec<String> = ds
        .modules
        .iter()
        .map(|module| module_declaration(module, &defs_ns))
        .collect();
    wrap_namespace("API", origin, &body.join("\n"))
}

fn module_declaration(module: &Module, defs_ns: &str) -> String {
    let mut out = doc_comment(&[module.description.as_str()]);
    out.push_str(&format!("export namespace {} {{\n", module.name));
    let endpoints: Vec<String> = module
        .endpoints
        .iter()
        .map(|ep| indent(&endpoint_declaration(ep, defs_ns), 2))
        .collect();
    out.push_str(&endpoints.join("\n"));
    out.push_str("}\n");
    out
}

fn endpoint_declaration(ep: &Endpoint, defs_ns: &str) -> String {
    let route = format!("{} {}", ep.method.as_str().to_uppercase(), ep.path);
    let mut out = doc_comment(&[ep.description.as_str(), route.as_str()]);
    out.push_str(&format!("export namespace {} {{\n", ep.name));

    out.push_str("  export class Params {\n");
    for param in ep
        .parameters
        .iter()
        .filter(|p| p.location != ParamLocation::Body)
    {
        out.push_str(&indent(&doc_comment(&[param.description.as_str()]), 4));
        out.push_str(&format!(
            "    {}{}: {};\n",
            param.name,
            if param.required { "" } else { "?" },
            param.data_type.render(defs_ns, &[])
        ));
    }
    out.push_str("  }\n\n");

    let response = ep.response_type.render(defs_ns, &[]);
    let body = ep.body.as_ref().map(|b| b.render(defs_ns, &[])).or_else(|| {
        ep.parameters
            .iter()
            .find(|p| p.location == ParamLocation::Body)
            .map(|p| p.data_type.render(defs_ns, &[]))
    });
    let request_params = match body {
        Some(body) => format!("params: Params, bodyParams: {}", body),
        None => "params: Params".to_string(),
    };

    out.push_str(&format!("  export type Response = {};\n", response));
    out.push_str("  export const init: Response;\n");
    out.push_str(&format!(
        "  export function request({}): Promise<Response>;\n",
        request_params
    ));
    out.push_str("}\n");
    out
}
