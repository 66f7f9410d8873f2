//! Text summaries of a plugin list.
//!
//! Every step renders as a title line padded to the display width, followed
//! by blocks that depend on the [`Verbosity`]. Styling is delegated to a
//! [`TextDecorator`], so the layout is the same with or without colour.
use colored::Colorize;
use serde_json::Value;

use crate::kernel::constants::{DEFAULT_RENDER_WIDTH, INACTIVE_MARKER};
use crate::kernel::error::Result;
use crate::plugin_list::step::PluginStep;
use crate::plugin_list::PluginList;
use crate::plugin_system::traits::PluginDocumentation;

const PARAMETER_MARGIN: usize = 4;
const SYNOPSIS_OFFSET: &str = "  ";
const INFO_OFFSET: &str = "    ";

/// How much of each step is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Title only
    Quiet,
    /// Title and parameter values
    #[default]
    Basic,
    /// Title with plugin id, synopsis, parameters and their descriptions
    Verbose,
    /// Everything in `Verbose` plus documentation info and warnings
    VeryVerbose,
}

/// Which parameters are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLevel {
    /// Only the parameters a step marks as user-visible
    #[default]
    User,
    /// Every parameter that is not hidden
    Advanced,
}

/// Options for [`PluginList::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub verbosity: Verbosity,
    pub level: DisplayLevel,
    /// First step index to render
    pub start: usize,
    /// One past the last step index to render; `None` renders to the end
    pub stop: Option<usize>,
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            level: DisplayLevel::default(),
            start: 0,
            stop: None,
            width: DEFAULT_RENDER_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity, ..Self::default() }
    }

    pub fn with_level(mut self, level: DisplayLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_range(mut self, start: usize, stop: Option<usize>) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Kind of text being decorated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    InactiveTitle,
    Synopsis,
    Info,
    Warning,
    Description,
}

/// Applies visual styling to rendered text.
///
/// Implementations must not change the visible characters, only wrap them.
pub trait TextDecorator {
    fn decorate(&self, text: &str, style: TextStyle) -> String;
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecorator;

impl TextDecorator for PlainDecorator {
    fn decorate(&self, text: &str, _style: TextStyle) -> String {
        text.to_string()
    }
}

/// Terminal colours through ANSI escape codes
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDecorator;

impl TextDecorator for AnsiDecorator {
    fn decorate(&self, text: &str, style: TextStyle) -> String {
        let styled = match style {
            TextStyle::Title => text.on_bright_black().bright_white(),
            TextStyle::InactiveTitle => text.on_bright_black().red().dimmed(),
            TextStyle::Synopsis | TextStyle::Info => text.on_bright_black().bright_white(),
            TextStyle::Warning => text.on_red().white(),
            TextStyle::Description => text.cyan(),
        };
        styled.to_string()
    }
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let current_len = current.chars().count();
            let needed = if current.is_empty() { word.len() } else { current_len + 1 + word.len() };
            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn pad_to(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Wrapped lines of `text`, each prefixed by `offset` and padded to `width`
fn equal_lines(text: &str, width: usize, offset: &str, style: TextStyle, decorator: &dyn TextDecorator) -> Option<String> {
    let lines = wrap(text, width.saturating_sub(offset.len()));
    if lines.is_empty() {
        return None;
    }
    Some(
        lines
            .iter()
            .map(|line| decorator.decorate(&pad_to(&format!("{}{}", offset, line), width), style))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn title(step: &PluginStep, count: usize, with_id: bool, width: usize, decorator: &dyn TextDecorator) -> String {
    let marker = if step.is_active() { "" } else { INACTIVE_MARKER };
    let position = step.position.map(|p| p.to_string()).unwrap_or_else(|| count.to_string());
    let mut text = format!("{} {:>2}) {}", marker, position, step.name);
    if with_id {
        text.push_str(&format!("({})", step.plugin_id));
    }
    let style = if step.is_active() { TextStyle::Title } else { TextStyle::InactiveTitle };
    decorator.decorate(&pad_to(&text, width), style)
}

fn shown_parameters<'a>(step: &'a PluginStep, level: DisplayLevel) -> impl Iterator<Item = (&'a String, &'a Value)> {
    step.parameters.iter().filter(move |(name, _)| {
        let visible = match (level, &step.visible_parameter_names) {
            (DisplayLevel::User, Some(visible)) => visible.contains(*name),
            _ => true,
        };
        let hidden = step
            .hidden_parameter_names
            .as_ref()
            .is_some_and(|hidden| hidden.contains(*name));
        visible && !hidden
    })
}

fn parameter_block(step: &PluginStep, options: &RenderOptions, with_descriptions: bool, decorator: &dyn TextDecorator) -> String {
    let margin = " ".repeat(PARAMETER_MARGIN);
    let mut out = String::new();
    for (n, (name, value)) in shown_parameters(step, options.level).enumerate() {
        out.push_str(&format!("\n   {:>2})   {:>20} : {}", n + 1, name, display_value(value)));
        if !with_descriptions {
            continue;
        }
        let description = step
            .parameter_descriptions
            .as_ref()
            .and_then(|d| d.get(name))
            .map(String::as_str)
            .unwrap_or_default();
        let wrapped = wrap(description, options.width).join(&format!("\n{}", margin));
        out.push('\n');
        out.push_str(&decorator.decorate(&format!("{}{}", margin, wrapped), TextStyle::Description));
    }
    out
}

impl PluginList {
    /// Render the steps in the requested range without styling
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        self.render_with(options, &PlainDecorator)
    }

    /// Render the steps in the requested range, one block per step joined by newlines.
    ///
    /// Verbose tiers instantiate each step's plugin to read its documentation,
    /// so every rendered id must resolve through the registry.
    pub fn render_with(&self, options: &RenderOptions, decorator: &dyn TextDecorator) -> Result<String> {
        let stop = options.stop.unwrap_or(self.len()).min(self.len());
        let start = options.start.min(stop);

        let mut blocks = Vec::with_capacity(stop - start);
        for (i, step) in self.steps[start..stop].iter().enumerate() {
            blocks.push(self.render_step(step, start + i + 1, options, decorator)?);
        }
        Ok(blocks.join("\n"))
    }

    fn documentation(&self, step: &PluginStep) -> Result<PluginDocumentation> {
        let mut plugin = self.registry.instantiate(&step.plugin_id)?;
        plugin.populate_default_parameters();
        Ok(plugin.documentation())
    }

    fn render_step(&self, step: &PluginStep, count: usize, options: &RenderOptions, decorator: &dyn TextDecorator) -> Result<String> {
        let width = options.width;
        match options.verbosity {
            Verbosity::Quiet => Ok(title(step, count, false, width, decorator)),
            Verbosity::Basic => Ok(format!(
                "{}{}",
                title(step, count, false, width, decorator),
                parameter_block(step, options, false, decorator)
            )),
            Verbosity::Verbose | Verbosity::VeryVerbose => {
                let docs = self.documentation(step)?;
                let mut out = title(step, count, true, width, decorator);
                if let Some(synopsis) = equal_lines(&docs.synopsis, width, SYNOPSIS_OFFSET, TextStyle::Synopsis, decorator) {
                    out.push('\n');
                    out.push_str(&synopsis);
                }
                if options.verbosity == Verbosity::VeryVerbose {
                    for (text, style) in [(&docs.info, TextStyle::Info), (&docs.warn, TextStyle::Warning)] {
                        if let Some(block) = equal_lines(text, width, INFO_OFFSET, style, decorator) {
                            out.push('\n');
                            out.push_str(&block);
                        }
                    }
                }
                out.push_str(&parameter_block(step, options, true, decorator));
                Ok(out)
            }
        }
    }
}
