use argtree_metadata::{ArgumentSummary, OptionSummary, ValueExpectation};

use crate::binder::{Bindable, Destination};
use crate::context::Context;
use crate::error::{Error, Result, ValueOrigin};

pub type OptionCallback<'a> = Box<dyn Fn(Option<&str>, &Context<'_>) -> Result<()> + 'a>;
pub type ArgumentCallback<'a> = Box<dyn Fn(&str, &Context<'_>) -> Result<()> + 'a>;

/// A flag-style input identified by one or more aliases.
///
/// Aliases are stored without the prefix: `["v", "verbose"]` matches both
/// `-v` and `--verbose` (and, since either prefix count is accepted, `--v`
/// and `-verbose` too).
pub struct Opt<'a> {
    aliases: Vec<String>,
    description: String,
    expectation: ValueExpectation,
    value_type: Option<&'static str>,
    callback: OptionCallback<'a>,
}

impl<'a> Opt<'a> {
    pub fn new<I, S, F>(
        aliases: I,
        description: impl Into<String>,
        expectation: ValueExpectation,
        callback: F,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Option<&str>, &Context<'_>) -> Result<()> + 'a,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            expectation,
            value_type: None,
            callback: Box::new(callback),
        }
    }

    /// An option that never demands a value.
    pub fn flag<I, S, F>(aliases: I, description: impl Into<String>, callback: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Option<&str>, &Context<'_>) -> Result<()> + 'a,
    {
        Self::new(aliases, description, ValueExpectation::NotRequired, callback)
    }

    /// Bind the option's value to a typed destination.
    ///
    /// Types with an implicit value (`bool`) accept presence alone; all others
    /// require a value.
    pub fn bind<I, S, T, D>(aliases: I, description: impl Into<String>, dest: &'a D) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        T: Bindable + 'a,
        D: Destination<T> + ?Sized,
    {
        let expectation = if T::implicit().is_some() {
            ValueExpectation::Optional
        } else {
            ValueExpectation::Required
        };

        let mut opt = Self::new(aliases, description, expectation, move |value, cntx| {
            let parsed = match value {
                Some(text) => T::parse_value(text).ok_or_else(|| {
                    Error::invalid_value(ValueOrigin::Option, cntx.name(), T::TYPE_NAME, text)
                })?,
                None => T::implicit().ok_or_else(|| Error::MissingValue {
                    option: cntx.name().to_string(),
                })?,
            };
            dest.store(parsed);
            Ok(())
        });
        opt.value_type = Some(T::TYPE_NAME);
        opt
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expectation(&self) -> ValueExpectation {
        self.expectation
    }

    pub fn value_type(&self) -> Option<&'static str> {
        self.value_type
    }

    pub(crate) fn invoke(&self, value: Option<&str>, cntx: &Context<'_>) -> Result<()> {
        (self.callback)(value, cntx)
    }

    pub fn summary(&self) -> OptionSummary {
        OptionSummary {
            aliases: self.aliases.clone(),
            description: self.description.clone(),
            value: self.expectation,
            value_type: self.value_type.map(str::to_string),
        }
    }
}

/// A positional input, bound by order.
pub struct Argument<'a> {
    name: String,
    description: String,
    value_type: Option<&'static str>,
    callback: ArgumentCallback<'a>,
}

impl<'a> Argument<'a> {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str, &Context<'_>) -> Result<()> + 'a,
    {
        Self {
            name: name.into(),
            description: description.into(),
            value_type: None,
            callback: Box::new(callback),
        }
    }

    /// Bind the argument to a typed destination. Booleans must be spelled out.
    pub fn bind<T, D>(name: impl Into<String>, description: impl Into<String>, dest: &'a D) -> Self
    where
        T: Bindable + 'a,
        D: Destination<T> + ?Sized,
    {
        let mut arg = Self::new(name, description, move |text, cntx| {
            let parsed = T::parse_value(text).ok_or_else(|| {
                Error::invalid_value(ValueOrigin::Argument, cntx.name(), T::TYPE_NAME, text)
            })?;
            dest.store(parsed);
            Ok(())
        });
        arg.value_type = Some(T::TYPE_NAME);
        arg
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn invoke(&self, value: &str, cntx: &Context<'_>) -> Result<()> {
        (self.callback)(value, cntx)
    }

    pub fn summary(&self) -> ArgumentSummary {
        ArgumentSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            value_type: self.value_type.map(str::to_string),
        }
    }
}
