// Reference geography loaded at startup.
//
// Purpose
// - Make sure every region exists and that known countries are attached to their region.
//
// Idempotent: names that already exist are left untouched, so running it on every boot is safe.

use sqlx::SqlitePool;
use tracing::info;

use super::{NamedTable, get_or_create};

pub const GEOGRAPHY: &[(&str, &[&str])] = &[
    (
        "Sub-Saharan Africa",
        &[
            "Angola",
            "Benin",
            "Botswana",
            "Burkina Faso",
            "Burundi",
            "Cabo Verde",
            "Cameroon",
            "Central African Republic",
            "Chad",
            "Comoros",
            "Congo",
            "Democratic Republic of the Congo",
            "Cote d'Ivoire",
            "Djibouti",
            "Equatorial Guinea",
            "Eritrea",
            "Eswatini",
            "Ethiopia",
            "Gabon",
            "Gambia",
            "Ghana",
            "Guinea",
            "Guinea-Bissau",
            "Kenya",
            "Lesotho",
            "Liberia",
            "Madagascar",
            "Malawi",
            "Mali",
            "Mauritania",
            "Mauritius",
            "Mozambique",
            "Namibia",
            "Niger",
            "Nigeria",
            "Rwanda",
            "Sao Tome and Principe",
            "Senegal",
            "Seychelles",
            "Sierra Leone",
            "Somalia",
            "South Africa",
            "South Sudan",
            "Sudan",
            "Tanzania",
            "Togo",
            "Uganda",
            "Zambia",
            "Zimbabwe",
        ],
    ),
    (
        "Middle East and North Africa",
        &[
            "Algeria",
            "Bahrain",
            "Egypt",
            "Iran",
            "Iraq",
            "Israel",
            "Jordan",
            "Kuwait",
            "Lebanon",
            "Libya",
            "Morocco",
            "Oman",
            "Qatar",
            "Saudi Arabia",
            "Syria",
            "Tunisia",
            "United Arab Emirates",
            "West Bank and Gaza Strip",
            "Yemen",
        ],
    ),
    (
        "East Asia and Pacific",
        &[
            "Brunei",
            "Cambodia",
            "China",
            "Fiji",
            "Indonesia",
            "Japan",
            "Kiribati",
            "Laos",
            "Malaysia",
            "Marshall Islands",
            "Micronesia",
            "Mongolia",
            "Myanmar",
            "Nauru",
            "New Zealand",
            "Palau",
            "Papua New Guinea",
            "Philippines",
            "South Korea",
            "Samoa",
            "Singapore",
            "Solomon Islands",
            "Thailand",
            "Timor-Leste",
            "Tonga",
            "Tuvalu",
            "Vanuatu",
            "Viet Nam",
        ],
    ),
    (
        "Europe and Central Asia",
        &[
            "Albania",
            "Armenia",
            "Azerbaijan",
            "Belarus",
            "Bosnia and Herzegovina",
            "Bulgaria",
            "Croatia",
            "Georgia",
            "Kazakhstan",
            "Kosovo",
            "Kyrgyzstan",
            "Moldova",
            "Montenegro",
            "North Macedonia",
            "Romania",
            "Russia",
            "Serbia",
            "Tajikistan",
            "Turkmenistan",
            "Turkey",
            "Ukraine",
            "Uzbekistan",
        ],
    ),
    (
        "Latin America and Caribbean",
        &[
            "Antigua and Barbuda",
            "Argentina",
            "Bahamas",
            "Barbados",
            "Belize",
            "Bolivia",
            "Brazil",
            "Chile",
            "Colombia",
            "Costa Rica",
            "Cuba",
            "Dominica",
            "Dominican Republic",
            "Ecuador",
            "El Salvador",
            "Grenada",
            "Guatemala",
            "Guyana",
            "Haiti",
            "Honduras",
            "Jamaica",
            "Mexico",
            "Nicaragua",
            "Panama",
            "Paraguay",
            "Peru",
            "Saint Kitts and Nevis",
            "Saint Lucia",
            "Saint Vincent and the Grenadines",
            "Suriname",
            "Trinidad and Tobago",
            "Uruguay",
            "Venezuela",
        ],
    ),
    (
        "South Asia",
        &[
            "Afghanistan",
            "Bangladesh",
            "Bhutan",
            "India",
            "Maldives",
            "Nepal",
            "Pakistan",
            "Sri Lanka",
        ],
    ),
];

/// Outcome of one seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub regions_created: u64,
    pub countries_created: u64,
}

pub async fn seed_geography(pool: &SqlitePool) -> Result<SeedReport, sqlx::Error> {
    info!("checking initial geographic data (regions and countries)");
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    for (region, countries) in GEOGRAPHY {
        let existed: Option<i64> = sqlx::query_scalar("SELECT id FROM regions WHERE name = ?")
            .bind(*region)
            .fetch_optional(&mut *tx)
            .await?;
        let region_id = match existed {
            Some(id) => id,
            None => {
                report.regions_created += 1;
                get_or_create(&mut tx, NamedTable::Regions, region).await?
            }
        };

        for country in *countries {
            let inserted = sqlx::query(
                "INSERT INTO countries (name, region_id) VALUES (?, ?) ON CONFLICT (name) DO NOTHING",
            )
            .bind(*country)
            .bind(region_id)
            .execute(&mut *tx)
            .await?;
            report.countries_created += inserted.rows_affected();
        }
    }

    tx.commit().await?;
    info!(
        regions_created = report.regions_created,
        countries_created = report.countries_created,
        "geographic seeding finished"
    );
    Ok(report)
}

#[cfg(test)]
mod shared_database_seeding_tests {
    use super::*;
    use crate::shared::infrastructure::database::connect_in_memory;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_create_every_region_and_country_once() {
        let pool = connect_in_memory().await.expect("in-memory database");
        let expected_countries: usize = GEOGRAPHY.iter().map(|(_, c)| c.len()).sum();

        let first = seed_geography(&pool).await.expect("first seed");
        let second = seed_geography(&pool).await.expect("second seed");

        assert_eq!(first.regions_created as usize, GEOGRAPHY.len());
        assert_eq!(first.countries_created as usize, expected_countries);
        assert_eq!(second, SeedReport::default());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_existing_countries_untouched() {
        let pool = connect_in_memory().await.expect("in-memory database");
        sqlx::query("INSERT INTO countries (name) VALUES ('Brazil')")
            .execute(&pool)
            .await
            .expect("pre-insert");

        seed_geography(&pool).await.expect("seed");

        let region: Option<i64> =
            sqlx::query_scalar("SELECT region_id FROM countries WHERE name = 'Brazil'")
                .fetch_one(&pool)
                .await
                .expect("brazil");
        assert_eq!(region, None);
    }
}
