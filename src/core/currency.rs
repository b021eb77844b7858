//! Currencies shown by the converter

/// `(code, country)` pairs, in display order.
pub const CURRENCIES: &[(&str, &str)] = &[
    ("USD", "United States"),
    ("EUR", "European Union"),
    ("GBP", "United Kingdom"),
    ("JPY", "Japan"),
    ("CNY", "China"),
    ("INR", "India"),
    ("CAD", "Canada"),
    ("AUD", "Australia"),
    ("NZD", "New Zealand"),
    ("CHF", "Switzerland"),
    ("SEK", "Sweden"),
    ("NOK", "Norway"),
    ("DKK", "Denmark"),
    ("ISK", "Iceland"),
    ("PLN", "Poland"),
    ("CZK", "Czech Republic"),
    ("HUF", "Hungary"),
    ("RON", "Romania"),
    ("BGN", "Bulgaria"),
    ("TRY", "Turkey"),
    ("RUB", "Russia"),
    ("UAH", "Ukraine"),
    ("ILS", "Israel"),
    ("AED", "United Arab Emirates"),
    ("SAR", "Saudi Arabia"),
    ("QAR", "Qatar"),
    ("KWD", "Kuwait"),
    ("EGP", "Egypt"),
    ("MAD", "Morocco"),
    ("NGN", "Nigeria"),
    ("KES", "Kenya"),
    ("ZAR", "South Africa"),
    ("BRL", "Brazil"),
    ("MXN", "Mexico"),
    ("ARS", "Argentina"),
    ("CLP", "Chile"),
    ("COP", "Colombia"),
    ("PEN", "Peru"),
    ("KRW", "South Korea"),
    ("HKD", "Hong Kong"),
    ("TWD", "Taiwan"),
    ("SGD", "Singapore"),
    ("MYR", "Malaysia"),
    ("THB", "Thailand"),
    ("IDR", "Indonesia"),
    ("PHP", "Philippines"),
    ("VND", "Vietnam"),
    ("PKR", "Pakistan"),
    ("BDT", "Bangladesh"),
    ("LKR", "Sri Lanka"),
];
