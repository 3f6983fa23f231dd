/// TypeScript bodies for the generated artifact trio
///
/// Pure string rendering: same manifest → same bytes. Every string literal is
/// JSON-quoted so any pattern or regex source is emitted safely.

use crate::table::{DynamicRoute, RouteManifest};

pub const BANNER: &str = "// This file is generated by routegen. Do not edit by hand.\n";

/// `types.ts`: route unions and the parameter map type
pub fn render_types<M>(manifest: &RouteManifest<M>) -> String {
    let static_routes: Vec<&str> = manifest.static_patterns().collect();
    let dynamic_routes: Vec<&str> = manifest
        .dynamic_routes()
        .iter()
        .map(|route| route.pattern.as_str())
        .collect();

    [
        BANNER.to_string(),
        render_union("StaticRoute", &static_routes),
        render_union("DynamicRoute", &dynamic_routes),
        "export type Route = StaticRoute | DynamicRoute;\n".to_string(),
        render_params_interface(manifest.dynamic_routes()),
    ]
    .join("\n")
}

/// `routes.ts`: route table plus matching and building helpers
pub fn render_routes<M>(manifest: &RouteManifest<M>) -> String {
    let static_entries = render_list(
        manifest
            .static_patterns()
            .map(|pattern| format!("  {},", quote(pattern))),
    );
    let dynamic_entries = render_list(manifest.dynamic_routes().iter().map(|route| {
        format!(
            "  {{ pattern: new RegExp({}), route: {} }},",
            quote(&route.matchable),
            quote(&route.pattern)
        )
    }));
    let param_names = render_list(manifest.dynamic_routes().iter().map(|route| {
        let names = route
            .params
            .iter()
            .map(|name| quote(name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("  {}: [{}],", quote(&route.pattern), names)
    }));

    format!(
        r#"{BANNER}
import type {{ DynamicRoute, Route, RouteParams, StaticRoute }} from "./types";

export class MissingParameterError extends Error {{
  constructor(
    readonly route: string,
    readonly parameter: string,
  ) {{
    super(`Missing parameter "${{parameter}}" for route "${{route}}"`);
    this.name = "MissingParameterError";
  }}
}}

export const staticRoutes: readonly StaticRoute[] = [{static_entries}];

export const dynamicRoutes: ReadonlyArray<{{ readonly pattern: RegExp; readonly route: DynamicRoute }}> = [{dynamic_entries}];

export const routeParamNames: {{ readonly [R in DynamicRoute]: readonly (keyof RouteParams[R] & string)[] }} = {{{param_names}}};

const PLACEHOLDER = /^\[([^\[\]]+)\]$/;

export function matchDynamicRoute(path: string): DynamicRoute | null {{
  for (const entry of dynamicRoutes) {{
    if (entry.pattern.test(path)) {{
      return entry.route;
    }}
  }}
  return null;
}}

export function extractParams<R extends DynamicRoute>(route: R, path: string): RouteParams[R] | null {{
  const entry = dynamicRoutes.find((candidate) => candidate.route === route);
  const match = entry ? entry.pattern.exec(path) : null;
  if (!match) {{
    return null;
  }}
  const names: readonly string[] = routeParamNames[route];
  const params: Record<string, string> = {{}};
  names.forEach((name, index) => {{
    params[name] = decodeURIComponent(match[index + 1]);
  }});
  return params as RouteParams[R];
}}

export type BuildPathArgs<R extends Route> = R extends DynamicRoute ? [params: RouteParams[R]] : [];

export function buildPath<R extends Route>(route: R, ...args: BuildPathArgs<R>): string {{
  const params = ((args as readonly unknown[])[0] ?? {{}}) as Record<string, string>;
  return route
    .split("/")
    .map((segment) => {{
      const placeholder = PLACEHOLDER.exec(segment);
      if (!placeholder) {{
        return segment;
      }}
      const name = placeholder[1];
      if (!Object.prototype.hasOwnProperty.call(params, name)) {{
        throw new MissingParameterError(route, name);
      }}
      return encodeURIComponent(params[name]);
    }})
    .join("/");
}}
"#
    )
}

/// `index.ts`: re-exports both generated modules
pub fn render_index() -> String {
    format!("{BANNER}\nexport * from \"./types\";\nexport * from \"./routes\";\n")
}

fn render_union(name: &str, members: &[&str]) -> String {
    if members.is_empty() {
        return format!("export type {name} = never;\n");
    }

    let body = members
        .iter()
        .map(|member| format!("  | {}", quote(member)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("export type {name} =\n{body};\n")
}

fn render_params_interface<M>(routes: &[DynamicRoute<M>]) -> String {
    if routes.is_empty() {
        return "export interface RouteParams {}\n".to_string();
    }

    let body = routes
        .iter()
        .map(|route| {
            let fields = unique_params(&route.params)
                .map(|name| format!("{}: string", quote(name)))
                .collect::<Vec<_>>()
                .join("; ");
            format!("  {}: {{ {} }};", quote(&route.pattern), fields)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("export interface RouteParams {{\n{body}\n}}\n")
}

/// Placeholder names with repeats removed, first occurrence kept
///
/// An object type must not repeat a key; the positional name list in
/// `routes.ts` keeps every entry so captures still line up.
fn unique_params(params: &[String]) -> impl Iterator<Item = &String> {
    params
        .iter()
        .enumerate()
        .filter(|(i, name)| !params[..*i].contains(name))
        .map(|(_, name)| name)
}

/// Multi-line list body, or nothing for an empty list
fn render_list(lines: impl Iterator<Item = String>) -> String {
    let lines: Vec<String> = lines.collect();
    if lines.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", lines.join("\n"))
    }
}

/// JSON string literal, valid as a TypeScript string literal
fn quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteRecord;
    use pretty_assertions::assert_eq;

    fn manifest(patterns: &[&str]) -> RouteManifest {
        let records: Vec<RouteRecord> = patterns
            .iter()
            .map(|p| RouteRecord::new("page.tsx", *p))
            .collect();
        RouteManifest::from_records(&records)
    }

    #[test]
    fn test_render_types() {
        let types = render_types(&manifest(&[
            "/",
            "/about",
            "/user/[id]",
            "/user/[id]/post/[postId]",
        ]));

        let expected = r#"// This file is generated by routegen. Do not edit by hand.

export type StaticRoute =
  | "/"
  | "/about";

export type DynamicRoute =
  | "/user/[id]"
  | "/user/[id]/post/[postId]";

export type Route = StaticRoute | DynamicRoute;

export interface RouteParams {
  "/user/[id]": { "id": string };
  "/user/[id]/post/[postId]": { "id": string; "postId": string };
}
"#;
        assert_eq!(types, expected);
    }

    #[test]
    fn test_render_types_empty() {
        let types = render_types(&RouteManifest::<()>::default());
        assert!(types.contains("export type StaticRoute = never;\n"));
        assert!(types.contains("export type DynamicRoute = never;\n"));
        assert!(types.contains("export interface RouteParams {}\n"));
    }

    #[test]
    fn test_render_routes_table() {
        let routes = render_routes(&manifest(&["/", "/v1.0/[id]"]));

        assert!(routes.starts_with(BANNER));
        assert!(routes.contains("export const staticRoutes: readonly StaticRoute[] = [\n  \"/\",\n];"));
        assert!(routes.contains(
            r#"  { pattern: new RegExp("^/v1\\.0/([^/]+)$"), route: "/v1.0/[id]" },"#
        ));
        assert!(routes.contains(r#"  "/v1.0/[id]": ["id"],"#));
    }

    #[test]
    fn test_render_routes_empty_lists() {
        let routes = render_routes(&RouteManifest::<()>::default());
        assert!(routes.contains("export const staticRoutes: readonly StaticRoute[] = [];"));
        assert!(routes.contains("readonly route: DynamicRoute }> = [];"));
        assert!(routes.contains("& string)[] } = {};"));
    }

    #[test]
    fn test_repeated_placeholder_renders_one_type_field() {
        let manifest = manifest(&["/[id]/x/[id]"]);

        let types = render_types(&manifest);
        assert!(types.contains(r#"  "/[id]/x/[id]": { "id": string };"#), "{types}");

        let routes = render_routes(&manifest);
        assert!(routes.contains(r#"  "/[id]/x/[id]": ["id", "id"],"#), "{routes}");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"/a"b\c"#), r#""/a\"b\\c""#);
    }

    #[test]
    fn test_render_index() {
        assert_eq!(
            render_index(),
            "// This file is generated by routegen. Do not edit by hand.\n\nexport * from \"./types\";\nexport * from \"./routes\";\n"
        );
    }
}
