//! Response models for the three Wikipedia Action API calls the engine
//! consumes. Only the fields we read are declared; everything else the API
//! sends is ignored.

use serde::Deserialize;
use std::collections::HashMap;

/// `action=query&prop=categories&titles=A|B|...&cllimit=max&redirects=1`
#[derive(Debug, Deserialize)]
pub struct CategoryResponse {
    #[serde(default)]
    pub query: Option<CategoryQuery>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub normalized: Vec<TitleMapping>,
    #[serde(default)]
    pub redirects: Vec<TitleMapping>,
    #[serde(default)]
    pub pages: HashMap<String, CategoryPage>,
}

/// `normalized` / `redirects` entries mapping a requested title to the one
/// the response is keyed under.
#[derive(Debug, Deserialize)]
pub struct TitleMapping {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPage {
    pub title: String,
    /// Present (as an empty string) when the page does not exist.
    #[serde(default)]
    pub missing: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<TitleItem>>,
}

#[derive(Debug, Deserialize)]
pub struct TitleItem {
    pub title: String,
}

/// `action=query&prop=extracts|links&exintro=1&explaintext=1&plnamespace=0&pllimit=max`
#[derive(Debug, Deserialize)]
pub struct PageDataResponse {
    #[serde(default, rename = "continue")]
    pub continuation: Option<PageDataContinue>,
    #[serde(default)]
    pub query: Option<PageDataQuery>,
}

#[derive(Debug, Deserialize)]
pub struct PageDataContinue {
    #[serde(default)]
    pub plcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageDataQuery {
    #[serde(default)]
    pub pages: HashMap<String, PageDataPage>,
}

#[derive(Debug, Deserialize)]
pub struct PageDataPage {
    #[serde(default)]
    pub missing: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<TitleItem>>,
}

/// `action=query&list=backlinks&bltitle=T&blnamespace=0&bllimit=max`
#[derive(Debug, Deserialize)]
pub struct BacklinksResponse {
    #[serde(default)]
    pub query: Option<BacklinksQuery>,
}

#[derive(Debug, Deserialize)]
pub struct BacklinksQuery {
    #[serde(default)]
    pub backlinks: Vec<TitleItem>,
}
