use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::compare::Comparison;
use crate::duration::format_minutes;
use crate::model::{ChartBucket, FlightLeg, GuidanceResult, LocationSuggestion, NormalizedFlight};

fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

pub fn format_price(price: f64, currency: &str) -> String {
    let p = amount(price);
    match currency {
        "USD" => format!("${p}"),
        "EUR" => format!("€{p}"),
        "GBP" => format!("£{p}"),
        "JPY" | "CNY" => format!("¥{p}"),
        "KRW" => format!("₩{p}"),
        "INR" => format!("₹{p}"),
        "THB" => format!("฿{p}"),
        _ => format!("{p} {currency}"),
    }
}

pub fn format_stops(stops: u32) -> String {
    match stops {
        0 => "Nonstop".to_string(),
        1 => "1 stop".to_string(),
        n => format!("{n} stops"),
    }
}

fn format_time(raw: &str, parsed: Option<chrono::NaiveDateTime>) -> String {
    parsed
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Badge text for a flight, e.g. `Cheapest, Best value`.
pub fn badges(flight: &NormalizedFlight, guidance: &GuidanceResult) -> String {
    let is = |id: &Option<String>| id.as_deref() == Some(flight.id.as_str());
    let mut out = Vec::new();
    if is(&guidance.cheapest_id) {
        out.push("Cheapest");
    }
    if is(&guidance.fastest_id) {
        out.push("Fastest");
    }
    if is(&guidance.best_value_id) {
        out.push("Best value");
    }
    out.join(", ")
}

fn leg_summary(leg: &FlightLeg) -> String {
    format!(
        "{} {} → {}\n{} → {}\n{}, {}",
        leg.carrier_code,
        leg.origin,
        leg.destination,
        format_time(&leg.departure_time, leg.departure_instant()),
        format_time(&leg.arrival_time, leg.arrival_instant()),
        format_minutes(leg.duration_minutes),
        format_stops(leg.stops),
    )
}

pub fn render(flights: &[NormalizedFlight], guidance: &GuidanceResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "", "Airline", "Route", "Depart", "Arrive", "Duration", "Stops", "Return", "Price",
        ]);

    for flight in flights {
        let leg = &flight.outbound;
        let route = format!("{} → {}", leg.origin, leg.destination);
        let depart = format_time(&leg.departure_time, leg.departure_instant());
        let arrive = format_time(&leg.arrival_time, leg.arrival_instant());
        let duration = format_minutes(leg.duration_minutes);
        let stops = format_stops(leg.stops);
        let return_leg = flight
            .return_leg
            .as_ref()
            .map(leg_summary)
            .unwrap_or_else(|| "—".to_string());
        let price = format_price(flight.price, &flight.currency);
        let badge = badges(flight, guidance);

        table.add_row(vec![
            &badge,
            &leg.carrier_name,
            &route,
            &depart,
            &arrive,
            &duration,
            &stops,
            &return_leg,
            &price,
        ]);
    }

    table.to_string()
}

fn comparison_leg(leg: Option<&FlightLeg>) -> String {
    let Some(leg) = leg else {
        return "No return flight".to_string();
    };
    format!(
        "{} ({})\n{} {} → {} {}\n{}, {}",
        leg.carrier_name,
        leg.carrier_code,
        leg.origin,
        format_time(&leg.departure_time, leg.departure_instant()),
        leg.destination,
        format_time(&leg.arrival_time, leg.arrival_instant()),
        format_minutes(leg.duration_minutes),
        format_stops(leg.stops),
    )
}

fn comparison_row(
    label: &str,
    flights: &[NormalizedFlight],
    cell: impl Fn(&NormalizedFlight) -> String,
) -> Vec<String> {
    let mut cells = vec![label.to_string()];
    cells.extend(flights.iter().map(cell));
    cells
}

pub fn render_comparison(comparison: &Comparison, guidance: &GuidanceResult) -> String {
    let flights = &comparison.flights;
    let mut header = vec![String::new()];
    header.extend((1..=flights.len()).map(|n| format!("Option {n}")));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table.add_row(comparison_row("Flight", flights, |f| f.id.clone()));
    table.add_row(comparison_row("Price", flights, |f| format_price(f.price, &f.currency)));
    table.add_row(comparison_row("Outbound", flights, |f| comparison_leg(Some(&f.outbound))));
    table.add_row(comparison_row("Return", flights, |f| comparison_leg(f.return_leg.as_ref())));
    table.add_row(comparison_row("Picks", flights, |f| badges(f, guidance)));

    table.to_string()
}

pub fn render_chart(buckets: &[ChartBucket], currency: &str) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Duration", "Minutes", "Flights", "Avg", "Min", "Max"]);

    for bucket in buckets {
        table.add_row(vec![
            bucket.label.clone(),
            format!("{}-{}", bucket.min_minutes, bucket.max_minutes),
            bucket.count.to_string(),
            format_price(bucket.average_price as f64, currency),
            format_price(bucket.min_price, currency),
            format_price(bucket.max_price, currency),
        ]);
    }

    table.to_string()
}

pub fn render_locations(locations: &[LocationSuggestion]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Code", "Type", "Name", "City", "Country"]);

    for loc in locations {
        table.add_row(vec![
            &loc.iata_code,
            &loc.sub_type,
            &loc.detailed_name,
            &loc.address.city_name,
            &loc.address.country_name,
        ]);
    }

    table.to_string()
}

/// One line per flight for scripts and agents.
pub fn compact_line(flight: &NormalizedFlight, guidance: &GuidanceResult) -> String {
    let leg_part = |leg: &FlightLeg| {
        format!(
            "{}>{} | {} | {} | {}",
            leg.origin,
            leg.destination,
            format_minutes(leg.duration_minutes),
            format_stops(leg.stops).to_lowercase(),
            leg.carrier_code,
        )
    };

    let mut line = format!(
        "{} | {} | {}",
        flight.id,
        format_price(flight.price, &flight.currency),
        leg_part(&flight.outbound)
    );
    if let Some(ref ret) = flight.return_leg {
        line.push_str(" || ");
        line.push_str(&leg_part(ret));
    }
    let badge = badges(flight, guidance);
    if !badge.is_empty() {
        line.push_str(&format!(" [{badge}]"));
    }
    line
}
