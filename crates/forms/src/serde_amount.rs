//! Amounts arrive as JSON numbers or, from decimal columns, as strings
//! (`"1500.00"`). Use with `#[serde(deserialize_with = "...")]`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Amount::Number(n) => Ok(n),
            Amount::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount: {s:?}"))),
        }
    }
}

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Amount::deserialize(deserializer)?.into_f64()
}

pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Amount>::deserialize(deserializer)? {
        Some(amount) => amount.into_f64().map(Some),
        None => Ok(None),
    }
}
