// src/constants.rs

/// The name of the metadata file written at the root of a generated project.
pub const METADATA_FILENAME: &str = "ps-extension.json";

/// The name of the optional tool configuration file (in the config directory).
pub const TOOL_CONFIG_FILENAME: &str = "config.toml";

/// The name of the tool's directory inside the platform config directory.
pub const CONFIG_DIR_NAME: &str = "cepgen";

/// The assembled extension, relative to the project root.
pub const DIST_DIR: &str = "dist";

/// Templates rendered at build time, relative to the project root.
pub const BUILD_TEMPLATES_DIR: &str = ".templates";

/// The panel UI subproject.
pub const UI_DIR: &str = "ui";

/// The ExtendScript host subproject.
pub const HOST_DIR: &str = "host";

/// Where the CEP helper scripts are downloaded to, relative to the project root.
pub const CEP_LIBS_DIR: &str = "ui/libs/cep";

/// Runtime helper scripts published for every CEP version.
pub const CEP_HELPER_FILES: [&str; 3] = ["CSInterface.js", "Vulcan.js", "AgoraLib.js"];

/// Version label preselected in the Photoshop version prompt.
pub const DEFAULT_VERSION_LABEL: &str = "CC 2015";

pub const DEFAULT_DEBUG_PORT: u16 = 8088;

pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";

pub const DEFAULT_UI_BUILD_COMMAND: &str = "npm run build";
