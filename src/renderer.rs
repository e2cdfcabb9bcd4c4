//! Template rendering for generated text files.
//! The built-in templates are registered once in a MiniJinja environment and
//! rendered by name with a JSON context.
use crate::error::Result;
use minijinja::Environment;

/// Name of the build file template.
pub const DOCKERFILE_TEMPLATE: &str = "Dockerfile.j2";

/// Name of the user hook boilerplate template.
pub const USER_HOOK_TEMPLATE: &str = "user-hook.sh.j2";

const DOCKERFILE_SOURCE: &str = "FROM {{ base_image }}
{%- for tool in tools %}
# tools ({{ tool.name }})
RUN {{ install_command }} {{ tool.plugin }} {{ tool.version }}
{%- endfor %}
";

const USER_HOOK_SOURCE: &str = "#!/bin/bash -e
# Additional setup scripts that need to be run {{ stage }} post-creation can be placed here - {{ display_name }} won't touch this file!
";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders the registered template `name` with the given context.
    ///
    /// # Arguments
    /// * `name` - Name of a registered template
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment holding the built-in templates
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the built-in templates registered.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if a built-in template fails to parse
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template(DOCKERFILE_TEMPLATE, DOCKERFILE_SOURCE)?;
        env.add_template(USER_HOOK_TEMPLATE, USER_HOOK_SOURCE)?;
        Ok(Self { env })
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::MinijinjaError` if the template is unknown or rendering fails
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(context)?)
    }
}
