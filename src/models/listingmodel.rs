use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "listing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Draft,
    Published,
    Archived,
}

/// A house for sale. Prices are stored as an integer count of currency
/// subunits (cents) so no floating-point money ever enters the system.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct House {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub maps_link: Option<String>,

    pub price_cents: i64,
    pub currency: String,

    // Specifications
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub parking: Option<i32>,
    pub floors: Option<i32>,
    pub lot_m2: Option<f64>,
    pub built_m2: Option<f64>,
    pub built_year: Option<i32>,

    // Location
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,

    pub services: Json<HashMap<String, bool>>,
    pub amenities: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,

    pub featured: bool,
    pub status: ListingStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A land parcel for sale.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Land {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub maps_link: Option<String>,

    pub price_cents: i64,
    pub currency: String,

    pub surface_m2: Option<f64>,

    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,

    pub services: Json<HashMap<String, bool>>,
    pub tags: Json<Vec<String>>,

    pub featured: bool,
    pub status: ListingStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One media item owned by a listing. Whether it is an image or a video is
/// not stored; it is derived from the URL extension at read time
/// (see `service::media`).
///
/// `sort_order` defines the gallery order. It need not be contiguous;
/// ties fall back to insertion order (`id`).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: i64,
    pub listing_id: i64,
    pub url: String,
    pub alt: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone)]
pub struct HouseWithMedia {
    pub house: House,
    pub media: Vec<Media>,
}

#[derive(Debug, Clone)]
pub struct LandWithMedia {
    pub land: Land,
    pub media: Vec<Media>,
}
