pub mod environment;
pub mod paths;
pub mod timestamps;

pub use environment::{Environment, Platform};
pub use paths::{
    apps_root_candidate, ensure_dir, expand_config_template, file_uri, format_path_with_tilde,
    project_name_from_path, resolve_apps_root, validate_file_size,
};
pub use timestamps::format_age;
