use crate::core::thermo::quantity::Enthalpy;

/// Picks the source whose high-level data should be used for a species.
///
/// An explicit `preferred` source always wins. Otherwise the first entry is the
/// initial choice and is replaced only by a later entry whose uncertainty is
/// strictly positive and strictly smaller than the current best. Equal
/// uncertainties keep the earlier source, and an entry with zero uncertainty is
/// never chosen unless it comes first.
///
/// Returns `None` when there is no override and no entry.
pub fn select_preferred_source<'a, I>(entries: I, preferred: Option<&'a str>) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a Enthalpy)>,
{
    if preferred.is_some() {
        return preferred;
    }

    let mut entries = entries.into_iter();
    let (mut chosen, first) = entries.next()?;
    let mut uncertainty = first.uncertainty_si();

    for (source, enthalpy) in entries {
        let candidate = enthalpy.uncertainty_si();
        if candidate > 0.0 && candidate < uncertainty {
            uncertainty = candidate;
            chosen = source;
        }
    }

    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(uncertainties: &[f64]) -> Vec<(String, Enthalpy)> {
        uncertainties
            .iter()
            .enumerate()
            .map(|(i, &u)| {
                (
                    format!("source-{i}"),
                    Enthalpy::with_uncertainty(0.0, "J/mol", u).unwrap(),
                )
            })
            .collect()
    }

    fn select(data: &[(String, Enthalpy)], preferred: Option<&str>) -> Option<String> {
        select_preferred_source(data.iter().map(|(s, h)| (s.as_str(), h)), preferred)
            .map(str::to_string)
    }

    #[test]
    fn explicit_preference_wins() {
        let data = entries(&[5.0, 1.0]);
        assert_eq!(select(&data, Some("other")), Some("other".to_string()));
    }

    #[test]
    fn smallest_positive_uncertainty_is_chosen() {
        let data = entries(&[5.0, 3.0, 1.0, 2.0]);
        assert_eq!(select(&data, None), Some("source-2".to_string()));
    }

    #[test]
    fn ties_keep_the_first_seen_source() {
        let data = entries(&[4.0, 1.0, 1.0]);
        assert_eq!(select(&data, None), Some("source-1".to_string()));

        let data = entries(&[2.0, 2.0]);
        assert_eq!(select(&data, None), Some("source-0".to_string()));
    }

    #[test]
    fn zero_uncertainty_is_only_chosen_when_first() {
        let data = entries(&[0.0, 1.0, 0.5]);
        assert_eq!(select(&data, None), Some("source-0".to_string()));

        let data = entries(&[2.0, 0.0, 1.0]);
        assert_eq!(select(&data, None), Some("source-2".to_string()));

        let data = entries(&[2.0, 0.0]);
        assert_eq!(select(&data, None), Some("source-0".to_string()));
    }

    #[test]
    fn no_entries_and_no_override_gives_none() {
        assert_eq!(select(&[], None), None);
    }
}
