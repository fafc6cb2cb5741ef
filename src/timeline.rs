//! Year-grouped timeline of dated items

use serde::Serialize;
use std::collections::BTreeMap;

use crate::helpers::year_of;

/// Anything with an ISO-8601 date string
pub trait Dated {
    fn date(&self) -> &str;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> &str {
        (**self).date()
    }
}

/// Items of one calendar year, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGroup<'a, T> {
    pub year: String,
    pub items: Vec<&'a T>,
}

/// Group items by calendar year, newest year first.
///
/// Within a year items are ordered by their raw date string, descending;
/// ISO-8601 strings sort chronologically. Items with equal dates keep their
/// input order, so repeated calls give the same result.
pub fn group_by_year<'a, T, I>(items: I) -> Vec<TimelineGroup<'a, T>>
where
    T: Dated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut years: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();

    for item in items {
        years.entry(year_of(item.date())).or_default().push(item);
    }

    years
        .into_iter()
        .rev()
        .map(|(year, mut items)| {
            items.sort_by(|a, b| b.date().cmp(a.date()));
            TimelineGroup { year, items }
        })
        .collect()
}
