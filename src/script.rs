//! Event scripts: host events written down one per line.
//!
//! ```text
//! # draw a short stroke
//! pen down
//! goto 30 0
//! jump 0 0          # forced move, not drawn
//! pen up
//! post "http://plotter.local/print"
//! ```

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::errors::{ScriptError, SourceContext};
use crate::types::{Point, pt};

#[derive(Parser)]
#[grammar = "plotter.pest"]
struct ScriptParser;

/// One host event.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    PenDown,
    PenUp,
    /// Drawn move of the active sprite
    Goto(Point),
    /// Forced move (teleport)
    Jump(Point),
    Feed,
    Clear,
    Clone,
    Dispose,
    /// Post to the given URL, or to the configured endpoint
    Post(Option<String>),
}

/// A parsed event script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    pub commands: Vec<Command>,
}

/// Parse script source. `ctx` names the source in diagnostics.
pub fn parse(ctx: &SourceContext) -> Result<Script, ScriptError> {
    let pairs = ScriptParser::parse(Rule::script, &ctx.source).map_err(|e| syntax_error(ctx, e))?;

    let mut commands = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::script {
            for inner in pair.into_inner() {
                if let Some(command) = parse_command(ctx, inner)? {
                    commands.push(command);
                }
            }
        }
    }
    Ok(Script { commands })
}

fn parse_command(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<Option<Command>, ScriptError> {
    let command = match pair.as_rule() {
        Rule::pen_down => Command::PenDown,
        Rule::pen_up => Command::PenUp,
        Rule::goto_cmd => Command::Goto(parse_point(ctx, pair)?),
        Rule::jump_cmd => Command::Jump(parse_point(ctx, pair)?),
        Rule::feed_cmd => Command::Feed,
        Rule::clear_cmd => Command::Clear,
        Rule::clone_cmd => Command::Clone,
        Rule::dispose_cmd => Command::Dispose,
        Rule::post_cmd => Command::Post(
            pair.into_inner()
                .flat_map(Pair::into_inner)
                .find(|p| p.as_rule() == Rule::url_body)
                .map(|p| p.as_str().to_owned()),
        ),
        _ => return Ok(None),
    };
    Ok(Some(command))
}

fn parse_point(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<Point, ScriptError> {
    let span = pair.as_span();
    let mut numbers = pair.into_inner().filter(|p| p.as_rule() == Rule::number);
    match (numbers.next(), numbers.next()) {
        (Some(x), Some(y)) => Ok(pt(parse_number(ctx, x)?, parse_number(ctx, y)?)),
        _ => Err(ctx.error("expected two coordinates", span.start(), span.end())),
    }
}

fn parse_number(ctx: &SourceContext, pair: Pair<'_, Rule>) -> Result<f64, ScriptError> {
    let span = pair.as_span();
    pair.as_str()
        .parse::<f64>()
        .map_err(|e| ctx.error(format!("invalid number: {e}"), span.start(), span.end()))
}

fn syntax_error(ctx: &SourceContext, err: pest::error::Error<Rule>) -> ScriptError {
    let (start, end) = match err.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span(span) => span,
    };
    ctx.error(err.variant.message(), start, end)
}
