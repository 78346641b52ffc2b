//! Command name to handler mapping

use anyhow::Result;

use crate::commands;
use crate::context::Context;

/// A command handler receives the arguments that follow its name
pub type Handler = fn(&mut Context<'_>, &[String]) -> Result<()>;

/// One registered command
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub handler: Handler,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("about", &self.about)
            .finish_non_exhaustive()
    }
}

/// Fixed set of commands, in registration order
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands shipped with trellis
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register(
                "run",
                "Run the application from the project directory",
                commands::run::run,
            )
            .register(
                "dist",
                "Build your web application into dist/",
                commands::dist::run,
            )
            .register("build", "Alias for dist", commands::dist::run)
            .register(
                "update",
                "Update all your dependencies listed in project.toml",
                commands::update::run,
            )
            .register(
                "test",
                "Run tests, skipping packages matched by omit_tests",
                commands::test::run,
            );
        registry
    }

    /// Add a command, replacing any existing command with the same name
    pub fn register(&mut self, name: &'static str, about: &'static str, handler: Handler) -> &mut Self {
        let spec = CommandSpec {
            name,
            about,
            handler,
        };
        match self.commands.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = spec,
            None => self.commands.push(spec),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Usage text listing every registered command
    pub fn usage(&self) -> String {
        let width = self.names().map(str::len).max().unwrap_or(0);
        let mut text = String::from("Build a Golang web application\n\nUsage: trellis [OPTIONS] <COMMAND> [ARGS]...\n\nCommands:\n");
        for command in &self.commands {
            text.push_str(&format!(
                "  {:<width$}    {}\n",
                command.name,
                command.about,
                width = width
            ));
        }
        text.push_str("\nRun 'trellis --help' for global options.\n");
        text
    }
}
