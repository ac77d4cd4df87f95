//! Embedded ISO 3166 reference data for location inference
//!
//! Short English names with ISO 3166-1 alpha-2/alpha-3 codes, ordered by
//! name, plus the US state postal abbreviations used by the subdivision
//! heuristic.

/// One ISO 3166-1 entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    pub alpha2: &'static str,
    pub alpha3: &'static str,
}

const fn c(name: &'static str, alpha2: &'static str, alpha3: &'static str) -> Country {
    Country {
        name,
        alpha2,
        alpha3,
    }
}

pub static COUNTRIES: &[Country] = &[
    c("Afghanistan", "AF", "AFG"),
    c("Albania", "AL", "ALB"),
    c("Algeria", "DZ", "DZA"),
    c("Andorra", "AD", "AND"),
    c("Angola", "AO", "AGO"),
    c("Antigua and Barbuda", "AG", "ATG"),
    c("Argentina", "AR", "ARG"),
    c("Armenia", "AM", "ARM"),
    c("Australia", "AU", "AUS"),
    c("Austria", "AT", "AUT"),
    c("Azerbaijan", "AZ", "AZE"),
    c("Bahamas", "BS", "BHS"),
    c("Bahrain", "BH", "BHR"),
    c("Bangladesh", "BD", "BGD"),
    c("Barbados", "BB", "BRB"),
    c("Belarus", "BY", "BLR"),
    c("Belgium", "BE", "BEL"),
    c("Belize", "BZ", "BLZ"),
    c("Benin", "BJ", "BEN"),
    c("Bhutan", "BT", "BTN"),
    c("Bolivia", "BO", "BOL"),
    c("Bosnia and Herzegovina", "BA", "BIH"),
    c("Botswana", "BW", "BWA"),
    c("Brazil", "BR", "BRA"),
    c("Brunei", "BN", "BRN"),
    c("Bulgaria", "BG", "BGR"),
    c("Burkina Faso", "BF", "BFA"),
    c("Burundi", "BI", "BDI"),
    c("Cabo Verde", "CV", "CPV"),
    c("Cambodia", "KH", "KHM"),
    c("Cameroon", "CM", "CMR"),
    c("Canada", "CA", "CAN"),
    c("Central African Republic", "CF", "CAF"),
    c("Chad", "TD", "TCD"),
    c("Chile", "CL", "CHL"),
    c("China", "CN", "CHN"),
    c("Colombia", "CO", "COL"),
    c("Comoros", "KM", "COM"),
    c("Congo", "CG", "COG"),
    c("Congo, The Democratic Republic of the", "CD", "COD"),
    c("Costa Rica", "CR", "CRI"),
    c("Croatia", "HR", "HRV"),
    c("Cuba", "CU", "CUB"),
    c("Cyprus", "CY", "CYP"),
    c("Czechia", "CZ", "CZE"),
    c("Denmark", "DK", "DNK"),
    c("Djibouti", "DJ", "DJI"),
    c("Dominica", "DM", "DMA"),
    c("Dominican Republic", "DO", "DOM"),
    c("Ecuador", "EC", "ECU"),
    c("Egypt", "EG", "EGY"),
    c("El Salvador", "SV", "SLV"),
    c("Equatorial Guinea", "GQ", "GNQ"),
    c("Eritrea", "ER", "ERI"),
    c("Estonia", "EE", "EST"),
    c("Eswatini", "SZ", "SWZ"),
    c("Ethiopia", "ET", "ETH"),
    c("Fiji", "FJ", "FJI"),
    c("Finland", "FI", "FIN"),
    c("France", "FR", "FRA"),
    c("Gabon", "GA", "GAB"),
    c("Gambia", "GM", "GMB"),
    c("Georgia", "GE", "GEO"),
    c("Germany", "DE", "DEU"),
    c("Ghana", "GH", "GHA"),
    c("Greece", "GR", "GRC"),
    c("Grenada", "GD", "GRD"),
    c("Guatemala", "GT", "GTM"),
    c("Guinea", "GN", "GIN"),
    c("Guinea-Bissau", "GW", "GNB"),
    c("Guyana", "GY", "GUY"),
    c("Haiti", "HT", "HTI"),
    c("Honduras", "HN", "HND"),
    c("Hungary", "HU", "HUN"),
    c("Iceland", "IS", "ISL"),
    c("India", "IN", "IND"),
    c("Indonesia", "ID", "IDN"),
    c("Iran", "IR", "IRN"),
    c("Iraq", "IQ", "IRQ"),
    c("Ireland", "IE", "IRL"),
    c("Israel", "IL", "ISR"),
    c("Italy", "IT", "ITA"),
    c("Jamaica", "JM", "JAM"),
    c("Japan", "JP", "JPN"),
    c("Jordan", "JO", "JOR"),
    c("Kazakhstan", "KZ", "KAZ"),
    c("Kenya", "KE", "KEN"),
    c("Kiribati", "KI", "KIR"),
    c("Korea, Republic of", "KR", "KOR"),
    c("Korea, Democratic People's Republic of", "KP", "PRK"),
    c("Kuwait", "KW", "KWT"),
    c("Kyrgyzstan", "KG", "KGZ"),
    c("Laos", "LA", "LAO"),
    c("Latvia", "LV", "LVA"),
    c("Lebanon", "LB", "LBN"),
    c("Lesotho", "LS", "LSO"),
    c("Liberia", "LR", "LBR"),
    c("Libya", "LY", "LBY"),
    c("Liechtenstein", "LI", "LIE"),
    c("Lithuania", "LT", "LTU"),
    c("Luxembourg", "LU", "LUX"),
    c("Madagascar", "MG", "MDG"),
    c("Malawi", "MW", "MWI"),
    c("Malaysia", "MY", "MYS"),
    c("Maldives", "MV", "MDV"),
    c("Mali", "ML", "MLI"),
    c("Malta", "MT", "MLT"),
    c("Marshall Islands", "MH", "MHL"),
    c("Mauritania", "MR", "MRT"),
    c("Mauritius", "MU", "MUS"),
    c("Mexico", "MX", "MEX"),
    c("Micronesia", "FM", "FSM"),
    c("Moldova", "MD", "MDA"),
    c("Monaco", "MC", "MCO"),
    c("Mongolia", "MN", "MNG"),
    c("Montenegro", "ME", "MNE"),
    c("Morocco", "MA", "MAR"),
    c("Mozambique", "MZ", "MOZ"),
    c("Myanmar", "MM", "MMR"),
    c("Namibia", "NA", "NAM"),
    c("Nauru", "NR", "NRU"),
    c("Nepal", "NP", "NPL"),
    c("Netherlands", "NL", "NLD"),
    c("New Zealand", "NZ", "NZL"),
    c("Nicaragua", "NI", "NIC"),
    c("Niger", "NE", "NER"),
    c("Nigeria", "NG", "NGA"),
    c("North Macedonia", "MK", "MKD"),
    c("Norway", "NO", "NOR"),
    c("Oman", "OM", "OMN"),
    c("Pakistan", "PK", "PAK"),
    c("Palau", "PW", "PLW"),
    c("Panama", "PA", "PAN"),
    c("Papua New Guinea", "PG", "PNG"),
    c("Paraguay", "PY", "PRY"),
    c("Peru", "PE", "PER"),
    c("Philippines", "PH", "PHL"),
    c("Poland", "PL", "POL"),
    c("Portugal", "PT", "PRT"),
    c("Qatar", "QA", "QAT"),
    c("Romania", "RO", "ROU"),
    c("Russian Federation", "RU", "RUS"),
    c("Rwanda", "RW", "RWA"),
    c("Saint Kitts and Nevis", "KN", "KNA"),
    c("Saint Lucia", "LC", "LCA"),
    c("Saint Vincent and the Grenadines", "VC", "VCT"),
    c("Samoa", "WS", "WSM"),
    c("San Marino", "SM", "SMR"),
    c("Sao Tome and Principe", "ST", "STP"),
    c("Saudi Arabia", "SA", "SAU"),
    c("Senegal", "SN", "SEN"),
    c("Serbia", "RS", "SRB"),
    c("Seychelles", "SC", "SYC"),
    c("Sierra Leone", "SL", "SLE"),
    c("Singapore", "SG", "SGP"),
    c("Slovakia", "SK", "SVK"),
    c("Slovenia", "SI", "SVN"),
    c("Solomon Islands", "SB", "SLB"),
    c("Somalia", "SO", "SOM"),
    c("South Africa", "ZA", "ZAF"),
    c("South Sudan", "SS", "SSD"),
    c("Spain", "ES", "ESP"),
    c("Sri Lanka", "LK", "LKA"),
    c("Sudan", "SD", "SDN"),
    c("Suriname", "SR", "SUR"),
    c("Sweden", "SE", "SWE"),
    c("Switzerland", "CH", "CHE"),
    c("Syria", "SY", "SYR"),
    c("Taiwan", "TW", "TWN"),
    c("Tajikistan", "TJ", "TJK"),
    c("Tanzania", "TZ", "TZA"),
    c("Thailand", "TH", "THA"),
    c("Timor-Leste", "TL", "TLS"),
    c("Togo", "TG", "TGO"),
    c("Tonga", "TO", "TON"),
    c("Trinidad and Tobago", "TT", "TTO"),
    c("Tunisia", "TN", "TUN"),
    c("Turkey", "TR", "TUR"),
    c("Turkmenistan", "TM", "TKM"),
    c("Tuvalu", "TV", "TUV"),
    c("Uganda", "UG", "UGA"),
    c("Ukraine", "UA", "UKR"),
    c("United Arab Emirates", "AE", "ARE"),
    c("United Kingdom", "GB", "GBR"),
    c("United States", "US", "USA"),
    c("Uruguay", "UY", "URY"),
    c("Uzbekistan", "UZ", "UZB"),
    c("Vanuatu", "VU", "VUT"),
    c("Venezuela", "VE", "VEN"),
    c("Vietnam", "VN", "VNM"),
    c("Yemen", "YE", "YEM"),
    c("Zambia", "ZM", "ZMB"),
    c("Zimbabwe", "ZW", "ZWE"),
];

/// US state postal abbreviations (the 50 states).
pub static US_STATE_ABBREVS: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];
