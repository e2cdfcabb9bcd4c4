//! Provisioning script generation.
//!
//! The script runs once inside the freshly built container. Every step is
//! preceded by a comment naming the configuration fields that produced it so
//! the generated output can be audited.

use crate::config::{Config, Folder, Options, Plugin};
use crate::constants::{commands, files, workspace_path, DEVCONTAINER_MOUNT_NAME};

/// Accumulates script lines.
#[derive(Debug, Default)]
struct Script {
    lines: Vec<String>,
}

impl Script {
    fn comment(&mut self, text: impl AsRef<str>) {
        self.lines.push(format!("# {}", text.as_ref()));
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Runs `commands` only when `manifest` exists in the current directory.
    fn guarded(&mut self, manifest: &str, commands: &[&str]) {
        self.line(format!("if [ -f \"./{manifest}\" ]; then"));
        for command in commands {
            self.line(format!("    {command}"));
        }
        self.line("fi");
    }

    fn finish(self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}

fn nodejs_setup(script: &mut Script, options: &Options) {
    script.comment("tools (nodejs:*)");
    if let Some(registry) = &options.npm_registry {
        script.comment(format!("options.npmRegistry ({registry})"));
        script.line(format!("npm config set registry {registry}"));
    }
    if options.use_yarn {
        script.comment(format!("options.useYarn ({})", options.use_yarn));
        script.line("npm install -g yarn");
        if let Some(registry) = &options.npm_registry {
            script.comment(format!(
                "options.useYarn ({}) + options.npmRegistry ({registry})",
                options.use_yarn
            ));
            script.line(format!("yarn config set registry {registry}"));
        }
    }
}

fn perl_setup(script: &mut Script, _: &Options) {
    script.comment("tools (perl:*)");
    script.line("export PERL_MM_USE_DEFAULT=1");
    script.line("cpan App::cpanminus");
    script.line("asdf reshim");
    script.line("cpanm --notest PLS Perl::LanguageServer");
    script.line("asdf reshim");
}

fn python_setup(script: &mut Script, options: &Options) {
    script.comment("tools (python:*)");
    script.line("echo \"[global]\" > /etc/pip.conf");

    let Some(server) = &options.pypi_server else {
        return;
    };
    script.comment(format!("options.pypiServer ({server})"));
    script.line(format!("echo \"index-url = {server}\" >> /etc/pip.conf"));

    if let Some(servers) = &options.extra_pypi_servers {
        script.comment(format!("options.extraPypiServers ({})", servers.join(",")));
        script.line("echo \"extra-index-url = \" >> /etc/pip.conf");
        for extra in servers {
            script.line(format!("echo \"\t{extra}\" >> /etc/pip.conf"));
        }
    }
    if let Some(hosts) = &options.trusted_pypi_servers {
        script.comment(format!("options.trustedPypiServers ({})", hosts.join(",")));
        script.line("echo \"trusted-host = \" >> /etc/pip.conf");
        for trusted in hosts {
            script.line(format!("echo \"\t{trusted}\" >> /etc/pip.conf"));
        }
    }
}

fn nodejs_folder(script: &mut Script, folder: &Folder, options: &Options) {
    if options.use_yarn {
        script.comment(format!("tools (nodejs:*) + options.useYarn ({})", options.use_yarn));
        script.line(format!("cd \"{}\"", folder.path));
        script.guarded("package.json", &["yarn"]);
    } else {
        script.comment("tools (nodejs:*)");
        script.line(format!("cd \"{}\"", folder.path));
        script.guarded("package.json", &["npm install --dev ."]);
    }
}

fn perl_folder(script: &mut Script, folder: &Folder, _: &Options) {
    script.comment("tools (perl:*)");
    script.line(format!("cd \"{}\"", folder.path));
    script.guarded("Makefile.PL", &["cpanm --notest ."]);
}

fn python_folder(script: &mut Script, folder: &Folder, _: &Options) {
    script.comment("tools (python:*)");
    script.line(format!("cd \"{}\"", folder.path));
    script.guarded("requirements.txt", &["pip install -r \"./requirements.txt\""]);
    script.guarded("setup.py", &["pip install -e ."]);
}

type Setup = fn(&mut Script, &Options);
type FolderSetup = fn(&mut Script, &Folder, &Options);

/// Per-plugin steps, in the order they appear in the script.
const PLUGIN_STEPS: [(Plugin, Setup, FolderSetup); 3] = [
    (Plugin::Nodejs, nodejs_setup as Setup, nodejs_folder as FolderSetup),
    (Plugin::Perl, perl_setup as Setup, perl_folder as FolderSetup),
    (Plugin::Python, python_setup as Setup, python_folder as FolderSetup),
];

/// Renders the provisioning script.
pub fn generate(config: &Config) -> String {
    let plugins = config.plugins();
    let steps: Vec<_> =
        PLUGIN_STEPS.iter().filter(|(plugin, _, _)| plugins.contains(plugin)).collect();
    let mut script = Script::default();

    script.line("#!/bin/bash -e");
    script.comment("hook to allow custom before post-create behavior");
    script.line(workspace_path(DEVCONTAINER_MOUNT_NAME, &[files::USER_BEFORE_POST_CREATE]));

    for (_, setup, _) in &steps {
        setup(&mut script, &config.options);
    }

    for folder in config.folders.values() {
        script.comment(format!("folder ({})", folder.path));
        for (plugin, _, folder_setup) in &steps {
            if folder.uses(*plugin) {
                folder_setup(&mut script, folder, &config.options);
            }
        }
    }

    script.comment("hook to allow custom after post-create behavior");
    script.line(workspace_path(DEVCONTAINER_MOUNT_NAME, &[files::USER_AFTER_POST_CREATE]));
    script.comment("finalize devcontainer creation");
    script.line(commands::FINALIZE);

    script.finish()
}
