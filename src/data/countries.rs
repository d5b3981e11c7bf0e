/// Primary-education pupil-teacher ratio for one Southeast Asian country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRatio {
    pub country: &'static str,
    /// ISO 3166-1 alpha-3 code.
    pub iso3: &'static str,
    /// Pupils per teacher in primary education.
    pub pupil_teacher_ratio: u32,
}

const fn record(country: &'static str, iso3: &'static str, pupil_teacher_ratio: u32) -> CountryRatio {
    CountryRatio {
        country,
        iso3,
        pupil_teacher_ratio,
    }
}

/// The fixed comparison set shown in the ratio view.
pub static COUNTRY_RATIOS: [CountryRatio; 11] = [
    record("Brunei Darussalam", "BRN", 10),
    record("Singapore", "SGP", 15),
    record("Malaysia", "MYS", 12),
    record("Vietnam", "VNM", 20),
    record("Indonesia", "IDN", 17),
    record("Timor-Leste", "TLS", 27),
    record("Thailand", "THA", 17),
    record("Myanmar", "MMR", 24),
    record("Philippines", "PHL", 29),
    record("Cambodia", "KHM", 42),
    record("Laos", "LAO", 22),
];

/// Look up a record by ISO-3 code (case-insensitive).
pub fn find_by_iso3(code: &str) -> Option<&'static CountryRatio> {
    let code = code.trim();
    COUNTRY_RATIOS.iter().find(|r| r.iso3.eq_ignore_ascii_case(code))
}

/// Smallest and largest ratio in the set.
pub fn ratio_range() -> (u32, u32) {
    COUNTRY_RATIOS
        .iter()
        .fold((u32::MAX, u32::MIN), |(lo, hi), r| {
            (lo.min(r.pupil_teacher_ratio), hi.max(r.pupil_teacher_ratio))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idn_lookup() {
        let idn = find_by_iso3("IDN").unwrap();
        assert_eq!(idn.country, "Indonesia");
        assert_eq!(idn.pupil_teacher_ratio, 17);
        assert_eq!(COUNTRY_RATIOS.iter().filter(|r| r.iso3 == "IDN").count(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_by_iso3(" khm").map(|r| r.pupil_teacher_ratio), Some(42));
        assert!(find_by_iso3("USA").is_none());
    }

    #[test]
    fn range_covers_set() {
        assert_eq!(ratio_range(), (10, 42));
    }
}
