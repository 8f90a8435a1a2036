// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Value assertions with messages aimed at students.
//!
//! Each failure names the line of the test that failed, then says what
//! return value was expected and what came back.

use std::fmt;
use std::panic::Location;
use std::path::Path;

use helpfultests_capture::capture;

use super::{call_header, interrupted, TestCase};
use crate::call::Call;
use crate::failure::Failure;
use crate::value::describe;

/// "The test was in x_tests.rs on line 12:" plus the line itself when
/// the source file can be read from the working directory.
fn test_site(location: &Location<'_>) -> String {
    let file = Path::new(location.file())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| location.file().to_string());
    let code = std::fs::read_to_string(location.file())
        .ok()
        .and_then(|source| {
            let index = usize::try_from(location.line()).ok()?.checked_sub(1)?;
            source.lines().nth(index).map(|line| line.trim().to_string())
        });
    match code {
        Some(code) if !code.is_empty() => {
            format!("The test was in {file} on line {}:\n    {code}\n", location.line())
        }
        _ => format!("The test was in {file} on line {}\n", location.line()),
    }
}

fn fail_at(location: &Location<'_>, body: String) -> Failure {
    Failure::assertion(format!("{}{body}", test_site(location)))
}

fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

impl TestCase {
    #[track_caller]
    pub fn assert_equal<A, E>(&self, actual: &A, expected: &E) -> Result<(), Failure>
    where
        A: PartialEq<E> + fmt::Debug + ?Sized,
        E: fmt::Debug + ?Sized,
    {
        if actual == expected {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value: {}\nActual return value:   {}",
                describe(expected),
                describe(actual)
            ),
        ))
    }

    #[track_caller]
    pub fn assert_not_equal<A, E>(&self, actual: &A, unexpected: &E) -> Result<(), Failure>
    where
        A: PartialEq<E> + fmt::Debug + ?Sized,
        E: fmt::Debug + ?Sized,
    {
        if actual != unexpected {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value to *not* be: {}\nActual return value: {}",
                describe(unexpected),
                describe(actual)
            ),
        ))
    }

    #[track_caller]
    pub fn assert_true(&self, actual: bool) -> Result<(), Failure> {
        if actual {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            "Expected return value to be true but was: false".to_string(),
        ))
    }

    #[track_caller]
    pub fn assert_false(&self, actual: bool) -> Result<(), Failure> {
        if !actual {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            "Expected return value to be false but was: true".to_string(),
        ))
    }

    #[track_caller]
    pub fn assert_none<T: fmt::Debug>(&self, actual: &Option<T>) -> Result<(), Failure> {
        match actual {
            None => Ok(()),
            Some(_) => Err(fail_at(
                Location::caller(),
                format!("Expected return value to be None but was: {}", describe(actual)),
            )),
        }
    }

    #[track_caller]
    pub fn assert_some<T: fmt::Debug>(&self, actual: &Option<T>) -> Result<(), Failure> {
        match actual {
            Some(_) => Ok(()),
            None => Err(fail_at(
                Location::caller(),
                "Expected return value to *not* be None but was: None".to_string(),
            )),
        }
    }

    /// Equal once both sides are rounded to `places` decimal places.
    #[track_caller]
    pub fn assert_almost_equal(&self, actual: f64, expected: f64, places: u32) -> Result<(), Failure> {
        let (actual, expected) = (round_to(actual, places), round_to(expected, places));
        if round_to(actual - expected, places) == 0.0 {
            return Ok(());
        }
        let places_usize = places as usize;
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value: {expected:.places_usize$} once rounded to {places} places\n\
                 Actual return value:   {actual:.places_usize$} once rounded to {places} places"
            ),
        ))
    }

    #[track_caller]
    pub fn assert_greater<A, B>(&self, actual: &A, bound: &B) -> Result<(), Failure>
    where
        A: PartialOrd<B> + fmt::Debug + ?Sized,
        B: fmt::Debug + ?Sized,
    {
        self.check_order(actual > bound, "greater than", actual, bound)
    }

    #[track_caller]
    pub fn assert_greater_equal<A, B>(&self, actual: &A, bound: &B) -> Result<(), Failure>
    where
        A: PartialOrd<B> + fmt::Debug + ?Sized,
        B: fmt::Debug + ?Sized,
    {
        self.check_order(actual >= bound, "greater than or equal to", actual, bound)
    }

    #[track_caller]
    pub fn assert_less<A, B>(&self, actual: &A, bound: &B) -> Result<(), Failure>
    where
        A: PartialOrd<B> + fmt::Debug + ?Sized,
        B: fmt::Debug + ?Sized,
    {
        self.check_order(actual < bound, "less than", actual, bound)
    }

    #[track_caller]
    pub fn assert_less_equal<A, B>(&self, actual: &A, bound: &B) -> Result<(), Failure>
    where
        A: PartialOrd<B> + fmt::Debug + ?Sized,
        B: fmt::Debug + ?Sized,
    {
        self.check_order(actual <= bound, "less than or equal to", actual, bound)
    }

    #[track_caller]
    fn check_order<A, B>(&self, holds: bool, relation: &str, actual: &A, bound: &B) -> Result<(), Failure>
    where
        A: fmt::Debug + ?Sized,
        B: fmt::Debug + ?Sized,
    {
        if holds {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value to be {relation}: {}\nActual return value: {}",
                describe(bound),
                describe(actual)
            ),
        ))
    }

    /// `actual` must be one of `options`.
    #[track_caller]
    pub fn assert_in<T: PartialEq + fmt::Debug>(&self, actual: &T, options: &[T]) -> Result<(), Failure> {
        if options.contains(actual) {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value to be in: {}\nActual return value: {}",
                describe(options),
                describe(actual)
            ),
        ))
    }

    /// `actual` text must contain `needle`.
    #[track_caller]
    pub fn assert_contains(&self, actual: &str, needle: &str) -> Result<(), Failure> {
        if actual.contains(needle) {
            return Ok(());
        }
        Err(fail_at(
            Location::caller(),
            format!(
                "Expected return value to contain: {}\nActual return value: {}",
                describe(needle),
                describe(actual)
            ),
        ))
    }

    /// Call `func` and compare its return value, naming the call on failure.
    ///
    /// Printing is allowed and ignored; reading input fails the test.
    #[track_caller]
    pub fn assert_returns<R, E>(&self, expected: &E, call: &Call, func: impl FnOnce() -> R) -> Result<R, Failure>
    where
        R: PartialEq<E> + fmt::Debug,
        E: fmt::Debug + ?Sized,
    {
        let location = Location::caller();
        let header = call_header(call);
        let value = capture(None, func)
            .outcome
            .map_err(|interrupt| interrupted(&header, interrupt))?;
        if value == *expected {
            return Ok(value);
        }
        Err(fail_at(
            location,
            format!(
                "{header}Expected return value: {}\nActual return value:   {}",
                describe(expected),
                describe(&value)
            ),
        ))
    }
}

#[cfg(test)]
#[path = "value_asserts_tests.rs"]
mod tests;
