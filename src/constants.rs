//! Common constants used throughout devcontainer-utils.

/// Name reported in generated comments and hook boilerplate.
pub const DISPLAY_NAME: &str = "devcontainer-utils";

/// Default configuration file name looked up by `generate` and written by `init`.
pub const CONFIG_FILE: &str = "devcontainer-utils.json";

/// Container-side root under which every mount is exposed.
pub const ROOT_WORKSPACE_FOLDER: &str = "/workspace";

/// Reserved mount and folder name holding the generated metadata.
pub const DEVCONTAINER_MOUNT_NAME: &str = ".devcontainer";

/// Base image every generated build file starts from.
pub const BASE_IMAGE: &str = "docker.io/benfiola/devcontainer-utils:0.0.3";

/// Directory of the tool version manager shims inside the base image.
pub const TOOL_SHIMS_DIR: &str = "/devcontainer-utils/asdf/shims";

/// Name of the primary service in the composition file.
pub const DEVCONTAINER_SERVICE: &str = "devcontainer";

/// Extension of files that receive the executable bit.
pub const SHELL_SCRIPT_EXTENSION: &str = ".sh";

/// Generated and template file names.
pub mod files {
    pub const DOCKERFILE: &str = "Dockerfile";
    pub const DEVCONTAINER: &str = "devcontainer.json";
    pub const DOCKER_COMPOSE: &str = "docker-compose.yaml";
    pub const POST_CREATE: &str = "post-create.sh";
    pub const USER_BEFORE_POST_CREATE: &str = "user-before-post-create.sh";
    pub const USER_AFTER_POST_CREATE: &str = "user-after-post-create.sh";
    pub const WORKSPACE: &str = "devcontainer-utils.code-workspace";
}

/// Commands provided by the base image.
pub mod commands {
    pub const INSTALL_TOOL: &str = "dc-utils install-tool";
    pub const FINALIZE: &str = "dc-utils finalize";
    pub const PROBE_PROGRAM: &str = "dc-utils";
    pub const PROBE_ARGS: [&str; 1] = ["is-finalized"];
}

/// Returns the container-side path of a mount, optionally extended with subpaths.
pub fn workspace_path(mount_name: &str, subpaths: &[&str]) -> String {
    let mut path = format!("{ROOT_WORKSPACE_FOLDER}/{mount_name}");
    for subpath in subpaths {
        path.push('/');
        path.push_str(subpath);
    }
    path
}
