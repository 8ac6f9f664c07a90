//! GNU-style argument parsing state machine.
//!
//! [`ArgsParser`] walks the argument list one character at a time through an
//! [`ArgCursor`] and turns it into [`Occurrence`]s:
//!
//! - `-x`, `-xvalue`, `-x value`, `-x=value` for short options,
//! - `--name`, `--name=value`, `--name value` for long options,
//! - `-abc` bundles of argument-less short options,
//! - `--` to treat every remaining argument as text.
//!
//! A parse can be halted early by a caller-supplied predicate; the unconsumed
//! arguments are then returned so that a second parse, possibly with another
//! catalog, can pick up where the first stopped.

use std::fmt;

use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::compat::check_incompatibilities;
use crate::cursor::{ArgCursor, NAME_SEPARATORS, Symbol, Token, VALUE_SEPARATORS};
use crate::error::ParseError;
use crate::outcome::ParseOutcome;
use crate::types::{ArityMode, Occurrence, OptionDescriptor, OptionId};

type HaltPredicate<'h> = dyn FnMut(Option<OptionId>) -> bool + 'h;

/// Argument parser bound to one catalog.
///
/// # Examples
///
/// ```
/// use clargs_core::{ArgsParser, ArityMode, Catalog, OptionDescriptor, OptionId};
///
/// let catalog = Catalog::new(vec![
///     OptionDescriptor::new(OptionId::Short('f'), Some("file"), ArityMode::Required),
///     OptionDescriptor::new(OptionId::Short('v'), Some("verbose"), ArityMode::Disallowed),
/// ])
/// .unwrap();
///
/// let outcome = ArgsParser::new(&catalog).parse(&["-v", "--file=build.xml", "target"]);
/// assert!(outcome.is_success());
///
/// let file = outcome.get_by_name("file").unwrap();
/// assert_eq!(file.argument(), Some("build.xml"));
/// assert_eq!(outcome.occurrences()[2].argument(), Some("target"));
/// ```
pub struct ArgsParser<'c, 'h> {
    catalog: &'c Catalog,
    halt: Option<Box<HaltPredicate<'h>>>,
}

impl fmt::Debug for ArgsParser<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgsParser")
            .field("catalog", &self.catalog)
            .field("halt", &self.halt.is_some())
            .finish()
    }
}

impl<'c, 'h> ArgsParser<'c, 'h> {
    /// Creates a parser that runs to the end of the arguments.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            halt: None,
        }
    }

    /// Stops the parse as soon as `predicate` returns `true`.
    ///
    /// The predicate is polled between occurrences with the id of the last
    /// committed one (`None` for text, or before anything was committed).
    /// When it fires, the remaining arguments are available through
    /// [`ParseOutcome::unparsed`] and no compatibility check runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use clargs_core::{ArgsParser, ArityMode, Catalog, OptionDescriptor, OptionId};
    ///
    /// let catalog = Catalog::new(vec![
    ///     OptionDescriptor::new(OptionId::Short('y'), Some("you"), ArityMode::Disallowed),
    /// ])
    /// .unwrap();
    ///
    /// let outcome = ArgsParser::new(&catalog)
    ///     .halt_when(|last| last == Some(OptionId::Short('y')))
    ///     .parse(&["--you", "are", "--all"]);
    ///
    /// assert!(outcome.is_success());
    /// assert_eq!(outcome.occurrences().len(), 1);
    /// assert_eq!(outcome.unparsed(), ["are", "--all"]);
    /// ```
    pub fn halt_when(mut self, predicate: impl FnMut(Option<OptionId>) -> bool + 'h) -> Self {
        self.halt = Some(Box::new(predicate));
        self
    }

    /// Parses `args`.
    pub fn parse<S: AsRef<str>>(mut self, args: &[S]) -> ParseOutcome {
        debug!(
            args = args.len(),
            options = self.catalog.len(),
            partial = self.halt.is_some(),
            "Parsing arguments"
        );

        let mut engine = Engine::new(self.catalog, args);
        let result = engine.run(self.halt.as_deref_mut());
        let occurrences = engine.occurrences;

        match result {
            Err(err) => {
                debug!(error = %err, "Argument parsing failed");
                ParseOutcome::failed(occurrences, err)
            }
            Ok(Some(unparsed)) => {
                debug!(
                    committed = occurrences.len(),
                    unparsed = unparsed.len(),
                    "Argument parsing halted"
                );
                ParseOutcome::succeeded(self.catalog, occurrences, unparsed)
            }
            Ok(None) => match check_incompatibilities(self.catalog, &occurrences) {
                Err(err) => {
                    debug!(error = %err, "Argument validation failed");
                    ParseOutcome::failed(occurrences, err)
                }
                Ok(()) => ParseOutcome::succeeded(self.catalog, occurrences, Vec::new()),
            },
        }
    }
}

/// Parses `args` against `catalog` without a halt predicate.
///
/// # Examples
///
/// ```
/// use clargs_core::{ArityMode, Catalog, OptionDescriptor, OptionId, parse_args};
///
/// let catalog = Catalog::new(vec![
///     OptionDescriptor::new(OptionId::Short('D'), Some("define"), ArityMode::RequiresTwo),
/// ])
/// .unwrap();
///
/// let outcome = parse_args(&catalog, &["-Dversion=1-2"]);
/// let define = outcome.get_by_id(OptionId::Short('D')).unwrap();
/// assert_eq!(define.arguments, ["version", "1-2"]);
/// ```
pub fn parse_args<S: AsRef<str>>(catalog: &Catalog, args: &[S]) -> ParseOutcome {
    ArgsParser::new(catalog).parse(args)
}

/// An option recognised but not yet committed.
#[derive(Debug)]
struct Pending {
    occurrence: Occurrence,
    /// `-x` or `--name`, as the user typed it.
    invoked_as: String,
    /// Element holding the first of two arguments.
    first_element: usize,
}

#[derive(Debug)]
enum State {
    Normal,
    RequireTwoArgs(Pending),
    RequireOneArg(Pending),
    OptionalArg(Pending),
    NoOptions,
    BundledShortOptions,
}

impl State {
    fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::RequireTwoArgs(_) | Self::RequireOneArg(_) | Self::OptionalArg(_)
        )
    }
}

struct Engine<'c, 'a, S> {
    catalog: &'c Catalog,
    cursor: ArgCursor<'a, S>,
    state: State,
    occurrences: Vec<Occurrence>,
    last_id: Option<OptionId>,
}

impl<'c, 'a, S: AsRef<str>> Engine<'c, 'a, S> {
    fn new(catalog: &'c Catalog, args: &'a [S]) -> Self {
        Self {
            catalog,
            cursor: ArgCursor::new(args),
            state: State::Normal,
            occurrences: Vec::new(),
            last_id: None,
        }
    }

    /// Runs to completion. Returns the unparsed remainder if halted.
    fn run(
        &mut self,
        mut halt: Option<&mut HaltPredicate<'_>>,
    ) -> Result<Option<Vec<String>>, ParseError> {
        while self.cursor.has_more() {
            if !self.state.is_pending()
                && let Some(predicate) = halt.as_deref_mut()
                && predicate(self.last_id)
            {
                return Ok(Some(self.remainder()));
            }

            let state = std::mem::replace(&mut self.state, State::Normal);
            self.state = self.step(state)?;
        }

        let state = std::mem::replace(&mut self.state, State::Normal);
        self.finish(state)?;
        Ok(None)
    }

    fn step(&mut self, state: State) -> Result<State, ParseError> {
        match state {
            State::Normal => self.parse_normal(),
            State::NoOptions => {
                let text = self.cursor.rest_of_element();
                self.commit(Occurrence::text(text));
                Ok(State::NoOptions)
            }
            State::BundledShortOptions => match self.cursor.peek() {
                Symbol::EndOfArg => {
                    self.cursor.advance();
                    Ok(State::Normal)
                }
                Symbol::Char(_) => self.parse_short_option(),
            },
            State::OptionalArg(pending) => self.parse_optional_argument(pending),
            State::RequireOneArg(pending) => self.parse_required_argument(pending),
            State::RequireTwoArgs(pending) => self.parse_argument_pair(pending),
        }
    }

    fn parse_normal(&mut self) -> Result<State, ParseError> {
        if self.cursor.peek() != Symbol::Char('-') {
            let text = self.cursor.read_token(VALUE_SEPARATORS).into_string();
            self.commit(Occurrence::text(text));
            return Ok(State::Normal);
        }

        self.cursor.advance();
        match self.cursor.peek() {
            Symbol::EndOfArg => Err(ParseError::MalformedOption),
            Symbol::Char('-') => {
                self.cursor.advance();
                if self.cursor.peek() == Symbol::EndOfArg {
                    self.cursor.advance();
                    return Ok(State::NoOptions);
                }

                let name = self.cursor.read_token(NAME_SEPARATORS).into_string();
                let invoked_as = format!("--{name}");
                let catalog = self.catalog;
                let descriptor = catalog
                    .by_long_name(&name)
                    .ok_or_else(|| ParseError::UnknownOption(invoked_as.clone()))?;
                Ok(self.begin_option(descriptor, invoked_as))
            }
            Symbol::Char(_) => self.parse_short_option(),
        }
    }

    fn parse_short_option(&mut self) -> Result<State, ParseError> {
        let Symbol::Char(ch) = self.cursor.advance() else {
            return Err(ParseError::InternalInconsistency(
                "short option without a character".to_string(),
            ));
        };

        let invoked_as = format!("-{ch}");
        let catalog = self.catalog;
        let descriptor = catalog
            .by_short(ch)
            .ok_or_else(|| ParseError::UnknownOption(invoked_as.clone()))?;

        Ok(match self.begin_option(descriptor, invoked_as) {
            State::Normal => State::BundledShortOptions,
            other => other,
        })
    }

    fn begin_option(&mut self, descriptor: &OptionDescriptor, invoked_as: String) -> State {
        let pending = Pending {
            occurrence: Occurrence::option(descriptor.id()),
            invoked_as,
            first_element: self.cursor.index(),
        };

        match descriptor.arity() {
            ArityMode::Disallowed => {
                self.commit(pending.occurrence);
                State::Normal
            }
            ArityMode::Optional => State::OptionalArg(pending),
            ArityMode::Required => State::RequireOneArg(pending),
            ArityMode::RequiresTwo => State::RequireTwoArgs(pending),
        }
    }

    fn parse_optional_argument(&mut self, mut pending: Pending) -> Result<State, ParseError> {
        match self.cursor.peek() {
            // Leave the dash for the next option.
            Symbol::Char('-') => {
                self.commit(pending.occurrence);
                return Ok(State::Normal);
            }
            Symbol::EndOfArg => {
                self.cursor.advance();
                self.commit(pending.occurrence);
                return Ok(State::Normal);
            }
            Symbol::Char('=') => {
                self.cursor.advance();
            }
            Symbol::Char(_) => {}
        }

        let value = self.cursor.read_token(VALUE_SEPARATORS).into_string();
        pending.occurrence.push_argument(value);
        self.commit(pending.occurrence);
        Ok(State::Normal)
    }

    fn parse_required_argument(&mut self, mut pending: Pending) -> Result<State, ParseError> {
        if matches!(self.cursor.peek(), Symbol::Char('=') | Symbol::EndOfArg) {
            self.cursor.advance();
        }

        let value = self.cursor.read_token(VALUE_SEPARATORS).into_string();
        pending.occurrence.push_argument(value);
        self.commit(pending.occurrence);
        Ok(State::Normal)
    }

    fn parse_argument_pair(&mut self, mut pending: Pending) -> Result<State, ParseError> {
        if pending.occurrence.argument_count() == 0 {
            pending.first_element = self.cursor.index();
            return match self.cursor.read_token(NAME_SEPARATORS) {
                Token::Separator => Err(ParseError::FirstArgumentUnparseable(pending.invoked_as)),
                Token::Text(first) => {
                    pending.occurrence.push_argument(first);
                    Ok(State::RequireTwoArgs(pending))
                }
            };
        }

        // The second value is the rest of the element that held the first,
        // separators included. If that element is used up it is empty.
        let second = if self.cursor.index() == pending.first_element {
            self.cursor.rest_of_element()
        } else {
            String::new()
        };
        pending.occurrence.push_argument(second);
        self.commit(pending.occurrence);
        Ok(State::Normal)
    }

    fn finish(&mut self, state: State) -> Result<(), ParseError> {
        match state {
            State::Normal | State::NoOptions | State::BundledShortOptions => Ok(()),
            State::OptionalArg(pending) => {
                self.commit(pending.occurrence);
                Ok(())
            }
            State::RequireOneArg(pending) => Err(ParseError::MissingArgument(pending.invoked_as)),
            State::RequireTwoArgs(mut pending) => match pending.occurrence.argument_count() {
                0 => Err(ParseError::MissingArgument(pending.invoked_as)),
                1 => {
                    pending.occurrence.push_argument(String::new());
                    self.commit(pending.occurrence);
                    Ok(())
                }
                count => Err(ParseError::InternalInconsistency(format!(
                    "{} left pending with {count} arguments",
                    pending.invoked_as
                ))),
            },
        }
    }

    fn commit(&mut self, occurrence: Occurrence) {
        trace!(id = ?occurrence.id, arguments = ?occurrence.arguments, "Committed occurrence");
        self.last_id = occurrence.id;
        self.occurrences.push(occurrence);
    }

    /// Unconsumed input, rewritten so that it parses the same way on its own.
    fn remainder(&self) -> Vec<String> {
        let mut rest = self.cursor.remainder();
        match self.state {
            State::BundledShortOptions if self.cursor.is_mid_element() => {
                if let Some(first) = rest.first_mut() {
                    first.insert(0, '-');
                }
            }
            State::NoOptions if !rest.is_empty() => rest.insert(0, "--".to_string()),
            _ => {}
        }
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            OptionDescriptor::new(OptionId::Short('a'), Some("all"), ArityMode::Disallowed),
            OptionDescriptor::new(OptionId::Short('b'), Some("blee"), ArityMode::Disallowed),
            OptionDescriptor::new(OptionId::Short('f'), Some("file"), ArityMode::Required),
            OptionDescriptor::new(OptionId::Short('T'), Some("taint"), ArityMode::Optional),
            OptionDescriptor::new(OptionId::Short('D'), Some("define"), ArityMode::RequiresTwo)
                .allow_duplicates(),
        ])
        .unwrap()
    }

    fn run(args: &[&str]) -> Result<Vec<Occurrence>, ParseError> {
        let catalog = catalog();
        let mut engine = Engine::new(&catalog, args);
        engine.run(None)?;
        Ok(engine.occurrences)
    }

    #[test]
    fn test_lone_dash_is_malformed() {
        assert_eq!(run(&["-"]), Err(ParseError::MalformedOption));
        assert_eq!(run(&["-", "x"]), Err(ParseError::MalformedOption));
    }

    #[test]
    fn test_unknown_options_name_the_literal_token() {
        assert_eq!(run(&["-z"]), Err(ParseError::UnknownOption("-z".into())));
        assert_eq!(run(&["-az"]), Err(ParseError::UnknownOption("-z".into())));
        assert_eq!(
            run(&["--zap=1"]),
            Err(ParseError::UnknownOption("--zap".into()))
        );
    }

    #[test]
    fn test_missing_argument_uses_invoked_form() {
        assert_eq!(run(&["-f"]), Err(ParseError::MissingArgument("-f".into())));
        assert_eq!(
            run(&["--file"]),
            Err(ParseError::MissingArgument("--file".into()))
        );
        assert_eq!(run(&["-D"]), Err(ParseError::MissingArgument("-D".into())));
    }

    #[test]
    fn test_pair_with_empty_first_slot() {
        assert_eq!(
            run(&["-D=x"]),
            Err(ParseError::FirstArgumentUnparseable("-D".into()))
        );
        assert_eq!(
            run(&["-D", "x=y"]),
            Err(ParseError::FirstArgumentUnparseable("-D".into()))
        );
    }

    #[test]
    fn test_long_pair_reads_next_element() {
        // The long name swallows its end-of-argument, so the pair starts
        // cleanly in the next element.
        let occurrences = run(&["--define", "x=y"]).unwrap();
        assert_eq!(occurrences[0].arguments, ["x", "y"]);
    }

    #[test]
    fn test_required_argument_takes_dash_value() {
        let occurrences = run(&["-f", "-a"]).unwrap();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].argument(), Some("-a"));
    }

    #[test]
    fn test_optional_argument_before_attached_option() {
        let occurrences = run(&["-T-a"]).unwrap();
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].id, Some(OptionId::Short('T')));
        assert_eq!(occurrences[0].argument_count(), 0);
        assert_eq!(occurrences[1].id, Some(OptionId::Short('a')));
    }

    #[test]
    fn test_optional_argument_at_end_of_stream() {
        let occurrences = run(&["--taint="]).unwrap();
        assert_eq!(occurrences, vec![Occurrence::option(OptionId::Short('T'))]);
    }

    #[test]
    fn test_bundle_ends_with_argument_option() {
        let occurrences = run(&["-abfout.txt"]).unwrap();
        let ids: Vec<u32> = occurrences.iter().map(Occurrence::code).collect();
        assert_eq!(ids, vec!['a' as u32, 'b' as u32, 'f' as u32]);
        assert_eq!(occurrences[2].argument(), Some("out.txt"));
    }

    #[test]
    fn test_empty_arguments_are_text() {
        let occurrences = run(&["", "x", ""]).unwrap();
        assert_eq!(
            occurrences,
            vec![Occurrence::text(""), Occurrence::text("x"), Occurrence::text("")]
        );

        let occurrences = run(&["-f", ""]).unwrap();
        assert_eq!(occurrences[0].argument(), Some(""));
    }

    #[test]
    fn test_halt_remainder_keeps_no_options_mode() {
        let catalog = catalog();
        let mut polls = 0;
        let outcome = ArgsParser::new(&catalog)
            .halt_when(|_| {
                polls += 1;
                polls == 3
            })
            .parse(&["--", "-a", "-b"]);
        assert_eq!(outcome.occurrences().len(), 1);
        assert_eq!(outcome.unparsed(), ["--", "-b"]);
    }

    #[test]
    fn test_halt_is_not_polled_while_an_option_is_pending() {
        let catalog = catalog();
        let mut seen = Vec::new();
        let outcome = ArgsParser::new(&catalog)
            .halt_when(|last| {
                seen.push(last);
                false
            })
            .parse(&["-f", "x", "-a"]);
        assert!(outcome.is_success());
        assert_eq!(seen, vec![None, Some(OptionId::Short('f'))]);
    }
}
