use crate::error::SearchError;
use crate::filter::FilterState;

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_ADULTS: u32 = 9;
const CURRENCY: &str = "USD";

#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub adults: u32,
}

fn validate_airport(code: &str) -> Result<(), SearchError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(SearchError::InvalidAirport(code.to_string()));
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn parse_date(date: &str) -> Result<(u32, u32, u32), SearchError> {
    let invalid = || SearchError::InvalidDate(date.to_string());
    let parts: Vec<&str> = date.split('-').collect();
    if parts.len() != 3 || parts[0].len() != 4 || parts[1].len() != 2 || parts[2].len() != 2 {
        return Err(invalid());
    }
    let year: u32 = parts[0].parse().map_err(|_| invalid())?;
    let month: u32 = parts[1].parse().map_err(|_| invalid())?;
    let day: u32 = parts[2].parse().map_err(|_| invalid())?;

    if year < 2000 || !(1..=12).contains(&month) {
        return Err(invalid());
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(invalid());
    }
    Ok((year, month, day))
}

impl SearchCriteria {
    pub fn validate(&self) -> Result<(), SearchError> {
        validate_airport(&self.origin)?;
        validate_airport(&self.destination)?;
        let departure = parse_date(&self.departure_date)?;

        if let Some(ref ret) = self.return_date {
            if parse_date(ret)? < departure {
                return Err(SearchError::Validation(format!(
                    "return date {ret} is before departure date {}",
                    self.departure_date
                )));
            }
        }

        if self.adults == 0 {
            return Err(SearchError::Validation(
                "at least one passenger required".into(),
            ));
        }
        if self.adults > MAX_ADULTS {
            return Err(SearchError::Validation(format!(
                "total passengers ({}) exceeds maximum of {MAX_ADULTS}",
                self.adults
            )));
        }

        Ok(())
    }

    /// Query string for the flight-offers endpoint. Stop and carrier filters
    /// are pushed down to the provider where it can apply them itself.
    pub fn to_query_params(
        &self,
        filters: Option<&FilterState>,
        limit: usize,
    ) -> Vec<(String, String)> {
        let mut params = vec![
            ("originLocationCode".to_string(), self.origin.clone()),
            ("destinationLocationCode".to_string(), self.destination.clone()),
            ("departureDate".to_string(), self.departure_date.clone()),
            ("adults".to_string(), self.adults.to_string()),
            ("currencyCode".to_string(), CURRENCY.to_string()),
            ("max".to_string(), limit.to_string()),
        ];

        if let Some(ref ret) = self.return_date {
            params.push(("returnDate".to_string(), ret.clone()));
        }

        if let Some(filters) = filters {
            if filters.is_nonstop_only() {
                params.push(("nonStop".to_string(), "true".to_string()));
            }
            if !filters.airlines.is_empty() {
                let codes: Vec<&str> = filters.airlines.iter().map(String::as_str).collect();
                params.push(("includedAirlineCodes".to_string(), codes.join(",")));
            }
        }

        params
    }
}
