use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Hand-owned helper files seeded once by `routegen init`
pub const BUILD_PATH_FILE: &str = "build-path.ts";
pub const DEFINE_ROUTE_FILE: &str = "define-route.ts";

/// Whether a seed file was created or an existing one was kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seeded {
    Created(PathBuf),
    Kept(PathBuf),
}

/// Write the initial config file unless one already exists
pub fn create_config(path: &Path) -> Result<Seeded> {
    create_new(path, CONFIG_TEMPLATE)
}

/// Stamp out the helper files into the output directory, never overwriting
pub fn create_helpers(output_dir: &Path) -> Result<Vec<Seeded>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    [
        (BUILD_PATH_FILE, BUILD_PATH_TEMPLATE),
        (DEFINE_ROUTE_FILE, DEFINE_ROUTE_TEMPLATE),
    ]
    .into_iter()
    .map(|(name, content)| create_new(&output_dir.join(name), content))
    .collect()
}

fn create_new(path: &Path, content: &str) -> Result<Seeded> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Seeded::Created(path.to_path_buf()))
        }
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(Seeded::Kept(path.to_path_buf())),
        Err(err) => Err(err).with_context(|| format!("Failed to create {}", path.display())),
    }
}

const CONFIG_TEMPLATE: &str = r#"# routegen.toml

# Directory scanned for `page.{ts,tsx,js,jsx}` files that call defineRoute/createRoute
root_dir = "app"

# Directory the generated types.ts, routes.ts and index.ts are written to
output_dir = "src/generated/routes"

# Glob patterns for directories to skip, matched against the path relative to
# root_dir and against the directory name. Directories starting with `_` are
# always skipped.
# exclude = ["@*", "(*)"]
exclude = []

# Route order in the generated table: "filesystem", "alphabetical" or "specificity"
sort = "specificity"

[watch]
debounce_ms = 300
"#;

const BUILD_PATH_TEMPLATE: &str = r#"// build-path.ts
// Created by `routegen init`. This file is yours: routegen never overwrites it.

import { buildPath, type BuildPathArgs, type Route } from "./index";

/**
 * Type-checked URL for a route. Dynamic routes require every parameter.
 *
 *   href("/about")
 *   href("/user/[id]", { id: "42" })
 */
export function href<R extends Route>(route: R, ...args: BuildPathArgs<R>): string {
  return buildPath(route, ...args);
}
"#;

const DEFINE_ROUTE_TEMPLATE: &str = r#"// define-route.ts
// Created by `routegen init`. This file is yours: routegen never overwrites it.
//
// A page file becomes a route once it calls defineRoute(...) or createRoute(...).

import type { DynamicRoute, Route, RouteParams, StaticRoute } from "./index";

export interface RouteDefinition<Meta = unknown> {
  readonly meta?: Meta;
}

export interface DynamicRouteDefinition<R extends DynamicRoute, Meta = unknown>
  extends RouteDefinition<Meta> {
  readonly route: R;
  readonly parse?: (params: RouteParams[R]) => void;
}

export function defineRoute<Meta = unknown>(definition: RouteDefinition<Meta> = {}): RouteDefinition<Meta> {
  return definition;
}

export function createRoute<R extends DynamicRoute, Meta = unknown>(
  definition: DynamicRouteDefinition<R, Meta>,
): DynamicRouteDefinition<R, Meta> {
  return definition;
}

export type { DynamicRoute, Route, StaticRoute };
"#;
