use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, Hash, TS, EnumString, Display,
)]
#[sqlx(type_name = "school", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum School {
    Benenden,
    Wycombe,
}

/// Kind of calendar period a term row describes
#[derive(Debug, Clone, Copy, Type, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[sqlx(type_name = "term_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TermType {
    Term,
    HalfTerm,
    Holiday,
    Exeat,
    ShortLeave,
    LongLeave,
}

/// A school calendar period. Seeded by migration and read-only through the API.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, TS)]
pub struct Term {
    pub id: String,
    pub school: School,
    pub name: String,
    #[serde(rename = "type")]
    pub term_type: TermType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub academic_year: String,
}

impl Term {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Term>(
            r#"SELECT id, school, name, term_type, start_date, end_date, academic_year
               FROM terms
               ORDER BY start_date ASC, id ASC"#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_school(pool: &PgPool, school: School) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Term>(
            r#"SELECT id, school, name, term_type, start_date, end_date, academic_year
               FROM terms
               WHERE school = $1
               ORDER BY start_date ASC, id ASC"#,
        )
        .bind(school)
        .fetch_all(pool)
        .await
    }

    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM terms WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
