// src/core/builtin_template.rs

// The default project template, embedded so the binary works without any
// template directory on disk. Source files live in `templates/default/`.

/// `(relative path, contents)` for every file of the built-in template.
pub const BUILTIN_TEMPLATE: &[(&str, &str)] = &[
    (
        ".gitignore",
        include_str!("../../templates/default/.gitignore"),
    ),
    (
        ".templates/.debug",
        include_str!("../../templates/default/.templates/.debug"),
    ),
    (
        ".templates/manifest.xml",
        include_str!("../../templates/default/.templates/manifest.xml"),
    ),
    (
        "README.md",
        include_str!("../../templates/default/README.md"),
    ),
    (
        "host/package.json",
        include_str!("../../templates/default/host/package.json"),
    ),
    (
        "host/src/script.jsx",
        include_str!("../../templates/default/host/src/script.jsx"),
    ),
    (
        "package.json",
        include_str!("../../templates/default/package.json"),
    ),
    (
        "ui/.angular-cli.json",
        include_str!("../../templates/default/ui/.angular-cli.json"),
    ),
    (
        "ui/package.json",
        include_str!("../../templates/default/ui/package.json"),
    ),
    (
        "ui/src/app/app.component.ts",
        include_str!("../../templates/default/ui/src/app/app.component.ts"),
    ),
    (
        "ui/src/app/app.module.ts",
        include_str!("../../templates/default/ui/src/app/app.module.ts"),
    ),
    (
        "ui/src/index.html",
        include_str!("../../templates/default/ui/src/index.html"),
    ),
    (
        "ui/src/main.ts",
        include_str!("../../templates/default/ui/src/main.ts"),
    ),
    (
        "ui/src/polyfills.ts",
        include_str!("../../templates/default/ui/src/polyfills.ts"),
    ),
    (
        "ui/src/tsconfig.app.json",
        include_str!("../../templates/default/ui/src/tsconfig.app.json"),
    ),
    (
        "ui/tsconfig.json",
        include_str!("../../templates/default/ui/tsconfig.json"),
    ),
];
