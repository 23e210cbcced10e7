use serde::{Deserialize, Serialize};

/// A street address as the backend spells it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

impl Address {
    /// Splits the one-line form produced by [`Address::display`]. Missing
    /// parts are left empty.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, ',').map(str::trim);
        let street_address = parts.next().unwrap_or_default().to_string();
        let city = parts.next().unwrap_or_default().to_string();
        let (state, postal_code) = parts
            .next()
            .map(|rest| rest.split_once(' ').unwrap_or((rest, "")))
            .unwrap_or_default();

        Self {
            street_address,
            city,
            state: state.trim().to_string(),
            postal_code: postal_code.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.street_address.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.postal_code.trim().is_empty()
    }

    /// `street, city, state postal`
    pub fn display(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street_address, self.city, self.state, self.postal_code
        )
    }
}

struct KnownAddress {
    street_address: &'static str,
    city: &'static str,
    state: &'static str,
    postal_code: &'static str,
}

const fn known(
    street_address: &'static str,
    city: &'static str,
    state: &'static str,
    postal_code: &'static str,
) -> KnownAddress {
    KnownAddress {
        street_address,
        city,
        state,
        postal_code,
    }
}

const KNOWN_ADDRESSES: [KnownAddress; 10] = [
    known("1600 Amphitheatre Parkway", "Mountain View", "CA", "94043"),
    known("1 Infinite Loop", "Cupertino", "CA", "95014"),
    known("350 5th Ave", "New York", "NY", "10118"),
    known("111 8th Ave", "New York", "NY", "10011"),
    known("1 Microsoft Way", "Redmond", "WA", "98052"),
    known("1600 Pennsylvania Ave NW", "Washington", "DC", "20500"),
    known("1211 Avenue of the Americas", "New York", "NY", "10036"),
    known("221B Baker Street", "London", "UK", "NW1 6XE"),
    known("405 Howard St", "San Francisco", "CA", "94105"),
    known("500 Terry A Francois Blvd", "San Francisco", "CA", "94158"),
];

impl From<&KnownAddress> for Address {
    fn from(known: &KnownAddress) -> Self {
        Self {
            street_address: known.street_address.to_string(),
            city: known.city.to_string(),
            state: known.state.to_string(),
            postal_code: known.postal_code.to_string(),
        }
    }
}

/// One of the known addresses, chosen by `seed` so callers get a stable pick
/// (an order id, for instance).
pub fn fallback_address(seed: u64) -> Address {
    let len = KNOWN_ADDRESSES.len() as u64;
    let index = usize::try_from(seed % len).unwrap_or_default();
    KNOWN_ADDRESSES
        .get(index)
        .map(Address::from)
        .unwrap_or_default()
}

/// `address` when it is complete, a fallback otherwise.
pub fn resolve_address(address: Option<&Address>, seed: u64) -> Address {
    match address {
        Some(address) if address.is_complete() => address.clone(),
        _ => fallback_address(seed),
    }
}
