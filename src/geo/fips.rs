/// (postal code, name, FIPS) for the states, DC and the territories that
/// send a delegate to the House.
const STATES: &[(&str, &str, &str)] = &[
    ("AL", "ALABAMA", "01"),
    ("AK", "ALASKA", "02"),
    ("AZ", "ARIZONA", "04"),
    ("AR", "ARKANSAS", "05"),
    ("CA", "CALIFORNIA", "06"),
    ("CO", "COLORADO", "08"),
    ("CT", "CONNECTICUT", "09"),
    ("DE", "DELAWARE", "10"),
    ("DC", "DISTRICT OF COLUMBIA", "11"),
    ("FL", "FLORIDA", "12"),
    ("GA", "GEORGIA", "13"),
    ("HI", "HAWAII", "15"),
    ("ID", "IDAHO", "16"),
    ("IL", "ILLINOIS", "17"),
    ("IN", "INDIANA", "18"),
    ("IA", "IOWA", "19"),
    ("KS", "KANSAS", "20"),
    ("KY", "KENTUCKY", "21"),
    ("LA", "LOUISIANA", "22"),
    ("ME", "MAINE", "23"),
    ("MD", "MARYLAND", "24"),
    ("MA", "MASSACHUSETTS", "25"),
    ("MI", "MICHIGAN", "26"),
    ("MN", "MINNESOTA", "27"),
    ("MS", "MISSISSIPPI", "28"),
    ("MO", "MISSOURI", "29"),
    ("MT", "MONTANA", "30"),
    ("NE", "NEBRASKA", "31"),
    ("NV", "NEVADA", "32"),
    ("NH", "NEW HAMPSHIRE", "33"),
    ("NJ", "NEW JERSEY", "34"),
    ("NM", "NEW MEXICO", "35"),
    ("NY", "NEW YORK", "36"),
    ("NC", "NORTH CAROLINA", "37"),
    ("ND", "NORTH DAKOTA", "38"),
    ("OH", "OHIO", "39"),
    ("OK", "OKLAHOMA", "40"),
    ("OR", "OREGON", "41"),
    ("PA", "PENNSYLVANIA", "42"),
    ("RI", "RHODE ISLAND", "44"),
    ("SC", "SOUTH CAROLINA", "45"),
    ("SD", "SOUTH DAKOTA", "46"),
    ("TN", "TENNESSEE", "47"),
    ("TX", "TEXAS", "48"),
    ("UT", "UTAH", "49"),
    ("VT", "VERMONT", "50"),
    ("VA", "VIRGINIA", "51"),
    ("WA", "WASHINGTON", "53"),
    ("WV", "WEST VIRGINIA", "54"),
    ("WI", "WISCONSIN", "55"),
    ("WY", "WYOMING", "56"),
    ("AS", "AMERICAN SAMOA", "60"),
    ("GU", "GUAM", "66"),
    ("MP", "NORTHERN MARIANA ISLANDS", "69"),
    ("PR", "PUERTO RICO", "72"),
    ("VI", "U.S. VIRGIN ISLANDS", "78"),
];

fn lookup(state: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    let state = state.trim();
    if state.is_empty() {
        return None;
    }
    STATES.iter().find(|(code, name, _)| {
        code.eq_ignore_ascii_case(state) || name.eq_ignore_ascii_case(state)
    })
}

/// Postal code for a state given by code or full name (any case)
pub fn state_code(state: &str) -> Option<&'static str> {
    lookup(state).map(|(code, _, _)| *code)
}

/// Two-digit FIPS code for a state given by code or full name (any case)
pub fn state_fips(state: &str) -> Option<&'static str> {
    lookup(state).map(|(_, _, fips)| *fips)
}

/// Postal code for a two-digit FIPS code
pub fn code_for_fips(fips: &str) -> Option<&'static str> {
    let fips = fips.trim();
    STATES
        .iter()
        .find(|(_, _, f)| *f == fips)
        .map(|(code, _, _)| *code)
}

/// Title-case state name for a state given by code or name
pub fn state_name(state: &str) -> Option<String> {
    lookup(state).map(|(code, name, _)| {
        if *code == "VI" {
            return "U.S. Virgin Islands".to_string();
        }
        name.split(' ')
            .map(|word| {
                let lower = word.to_ascii_lowercase();
                match lower.as_str() {
                    "of" => lower,
                    _ => {
                        let mut chars = lower.chars();
                        match chars.next() {
                            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                            None => String::new(),
                        }
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    })
}
