/// Display name for a carrier code, or the code itself when unknown.
pub fn carrier_name(code: &str) -> &str {
    match code {
        "AA" => "American Airlines",
        "DL" => "Delta Air Lines",
        "UA" => "United Airlines",
        "LH" => "Lufthansa",
        "AF" => "Air France",
        "BA" => "British Airways",
        "EK" => "Emirates",
        "QR" => "Qatar Airways",
        "SQ" => "Singapore Airlines",
        "IB" => "Iberia",
        "VY" => "Vueling",
        "FR" => "Ryanair",
        "EZY" => "EasyJet",
        "TK" => "Turkish Airlines",
        "B6" => "JetBlue",
        "WN" => "Southwest Airlines",
        "AC" => "Air Canada",
        "LX" => "Swiss International",
        _ => code,
    }
}
