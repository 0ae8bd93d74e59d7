use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    db::listingdb::{HouseSearchFilters, LandSearchFilters},
    models::listingmodel::{House, HouseWithMedia, Land, LandWithMedia, Media},
    service::media::{card_display, classify, CardDisplay, PLACEHOLDER_URL},
    utils::currency::format_price_cents,
};

// Price-band boundaries, in cents. The two catalogs use different
// thresholds: house and land prices are distributed very differently.
pub const HOUSE_PRICE_LOW_MAX_CENTS: i64 = 500_000_000; // 5,000,000 MXN
pub const HOUSE_PRICE_MID_MAX_CENTS: i64 = 1_000_000_000; // 10,000,000 MXN
pub const LAND_PRICE_LOW_MAX_CENTS: i64 = 100_000_000; // 1,000,000 MXN
pub const LAND_PRICE_MID_MAX_CENTS: i64 = 500_000_000; // 5,000,000 MXN

pub const SURFACE_SMALL_MAX_M2: f64 = 200.0;
pub const SURFACE_MEDIUM_MAX_M2: f64 = 500.0;

/// User-selected price bracket. Bounds are exclusive below and inclusive
/// above, so a listing priced exactly on a boundary lands in the lower
/// band.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceBand {
    #[default]
    All,
    Low,
    Mid,
    High,
}

impl PriceBand {
    fn bounds(self, low_max: i64, mid_max: i64) -> (Option<i64>, Option<i64>) {
        match self {
            PriceBand::All => (None, None),
            PriceBand::Low => (None, Some(low_max)),
            PriceBand::Mid => (Some(low_max), Some(mid_max)),
            PriceBand::High => (Some(mid_max), None),
        }
    }

    pub fn house_bounds(self) -> (Option<i64>, Option<i64>) {
        self.bounds(HOUSE_PRICE_LOW_MAX_CENTS, HOUSE_PRICE_MID_MAX_CENTS)
    }

    pub fn land_bounds(self) -> (Option<i64>, Option<i64>) {
        self.bounds(LAND_PRICE_LOW_MAX_CENTS, LAND_PRICE_MID_MAX_CENTS)
    }

    pub fn matches_house(self, price_cents: i64) -> bool {
        in_range_i64(self.house_bounds(), price_cents)
    }

    pub fn matches_land(self, price_cents: i64) -> bool {
        in_range_i64(self.land_bounds(), price_cents)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceBand {
    #[default]
    All,
    Small,
    Medium,
    Large,
}

impl SurfaceBand {
    pub fn bounds(self) -> (Option<f64>, Option<f64>) {
        match self {
            SurfaceBand::All => (None, None),
            SurfaceBand::Small => (None, Some(SURFACE_SMALL_MAX_M2)),
            SurfaceBand::Medium => (Some(SURFACE_SMALL_MAX_M2), Some(SURFACE_MEDIUM_MAX_M2)),
            SurfaceBand::Large => (Some(SURFACE_MEDIUM_MAX_M2), None),
        }
    }

    pub fn matches(self, surface_m2: f64) -> bool {
        let (over, up_to) = self.bounds();
        over.map_or(true, |min| surface_m2 > min) && up_to.map_or(true, |max| surface_m2 <= max)
    }
}

fn in_range_i64((over, up_to): (Option<i64>, Option<i64>), value: i64) -> bool {
    over.map_or(true, |min| value > min) && up_to.map_or(true, |max| value <= max)
}

/// "any" (or an absent/empty value) means no constraint; a number N means
/// "at least N".
fn de_min_count<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("any") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid count filter: {value}"))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HouseFilterDto {
    #[serde(default)]
    pub price: PriceBand,
    #[serde(default, deserialize_with = "de_min_count")]
    pub bedrooms: Option<i32>,
    #[serde(default, deserialize_with = "de_min_count")]
    pub bathrooms: Option<i32>,
    #[serde(default, deserialize_with = "de_min_count")]
    pub parking: Option<i32>,
}

impl HouseFilterDto {
    pub fn to_search_filters(&self) -> HouseSearchFilters {
        let (price_over_cents, price_up_to_cents) = self.price.house_bounds();
        HouseSearchFilters {
            price_over_cents,
            price_up_to_cents,
            min_bedrooms: self.bedrooms,
            min_bathrooms: self.bathrooms,
            min_parking: self.parking,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LandFilterDto {
    #[serde(default)]
    pub price: PriceBand,
    #[serde(default)]
    pub surface: SurfaceBand,
}

impl LandFilterDto {
    pub fn to_search_filters(&self) -> LandSearchFilters {
        let (price_over_cents, price_up_to_cents) = self.price.land_bounds();
        let (surface_over_m2, surface_up_to_m2) = self.surface.bounds();
        LandSearchFilters {
            price_over_cents,
            price_up_to_cents,
            surface_over_m2,
            surface_up_to_m2,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediaItemDto {
    pub id: i64,
    pub url: String,
    pub alt: Option<String>,
    pub sort_order: i32,
    pub kind: &'static str,
}

impl MediaItemDto {
    pub fn from_media(media: &Media) -> Self {
        MediaItemDto {
            id: media.id,
            url: media.url.clone(),
            alt: media.alt.clone(),
            sort_order: media.sort_order,
            kind: classify(&media.url).as_str(),
        }
    }
}

/// Grid/card projection of a listing, with the media decision already
/// made: which asset is the cover, whether a hover preview exists, and
/// the resulting display mode.
#[derive(Debug, Serialize)]
pub struct ListingCardDto {
    pub kind: &'static str,
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub price_display: String,
    pub currency: String,
    pub address: Option<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_m2: Option<f64>,
    pub cover_image_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub display_mode: &'static str,
}

fn card_media(media: &[Media]) -> (Option<String>, Option<String>, &'static str) {
    let display = card_display(media);
    let mode = display.mode();
    match display {
        CardDisplay::ImageOnly { image } => (Some(image.to_string()), None, mode),
        CardDisplay::ImageWithVideoPreview { image, video } => {
            (Some(image.to_string()), Some(video.to_string()), mode)
        }
        CardDisplay::VideoLoop { video } => (None, Some(video.to_string()), mode),
        CardDisplay::Placeholder => (Some(PLACEHOLDER_URL.to_string()), None, mode),
    }
}

impl ListingCardDto {
    pub fn from_house(listing: &HouseWithMedia) -> Self {
        let house = &listing.house;
        let (cover_image_url, preview_video_url, display_mode) = card_media(&listing.media);

        ListingCardDto {
            kind: "house",
            id: house.id,
            slug: house.slug.clone(),
            title: house.title.clone(),
            description: house.description.clone(),
            price_cents: house.price_cents,
            price_display: format_price_cents(house.price_cents, &house.currency),
            currency: house.currency.clone(),
            address: house.address.clone(),
            featured: house.featured,
            bedrooms: house.bedrooms,
            bathrooms: house.bathrooms,
            parking: house.parking,
            surface_m2: None,
            cover_image_url,
            preview_video_url,
            display_mode,
        }
    }

    pub fn from_land(listing: &LandWithMedia) -> Self {
        let land = &listing.land;
        let (cover_image_url, preview_video_url, display_mode) = card_media(&listing.media);

        ListingCardDto {
            kind: "land",
            id: land.id,
            slug: land.slug.clone(),
            title: land.title.clone(),
            description: land.description.clone(),
            price_cents: land.price_cents,
            price_display: format_price_cents(land.price_cents, &land.currency),
            currency: land.currency.clone(),
            address: land.address.clone(),
            featured: land.featured,
            bedrooms: None,
            bathrooms: None,
            parking: None,
            surface_m2: land.surface_m2,
            cover_image_url,
            preview_video_url,
            display_mode,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HouseDetailDto {
    #[serde(flatten)]
    pub house: House,
    pub price_display: String,
    pub media: Vec<MediaItemDto>,
}

impl HouseDetailDto {
    pub fn from_listing(listing: &HouseWithMedia) -> Self {
        HouseDetailDto {
            house: listing.house.clone(),
            price_display: format_price_cents(listing.house.price_cents, &listing.house.currency),
            media: listing.media.iter().map(MediaItemDto::from_media).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LandDetailDto {
    #[serde(flatten)]
    pub land: Land,
    pub price_display: String,
    pub media: Vec<MediaItemDto>,
}

impl LandDetailDto {
    pub fn from_listing(listing: &LandWithMedia) -> Self {
        LandDetailDto {
            land: listing.land.clone(),
            price_display: format_price_cents(listing.land.price_cents, &listing.land.currency),
            media: listing.media.iter().map(MediaItemDto::from_media).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_price_bands_split_at_5m_and_10m() {
        // 6,500,000 MXN sits in the mid band, not low.
        assert!(PriceBand::Mid.matches_house(650_000_000));
        assert!(!PriceBand::Low.matches_house(650_000_000));
        assert!(!PriceBand::High.matches_house(650_000_000));

        // Boundaries are inclusive on the upper edge.
        assert!(PriceBand::Low.matches_house(HOUSE_PRICE_LOW_MAX_CENTS));
        assert!(!PriceBand::Mid.matches_house(HOUSE_PRICE_LOW_MAX_CENTS));
        assert!(PriceBand::Mid.matches_house(HOUSE_PRICE_MID_MAX_CENTS));
        assert!(PriceBand::High.matches_house(HOUSE_PRICE_MID_MAX_CENTS + 1));
    }

    #[test]
    fn land_price_bands_use_their_own_thresholds() {
        // 3,000,000 MXN: mid for land, low for houses.
        assert!(PriceBand::Mid.matches_land(300_000_000));
        assert!(PriceBand::Low.matches_house(300_000_000));

        assert!(PriceBand::Low.matches_land(LAND_PRICE_LOW_MAX_CENTS));
        assert!(PriceBand::High.matches_land(LAND_PRICE_MID_MAX_CENTS + 1));
    }

    #[test]
    fn surface_band_upper_bound_is_inclusive() {
        assert!(SurfaceBand::Medium.matches(500.0));
        assert!(!SurfaceBand::Large.matches(500.0));
        assert!(SurfaceBand::Large.matches(500.5));
        assert!(SurfaceBand::Small.matches(200.0));
        assert!(!SurfaceBand::Medium.matches(200.0));
    }

    #[test]
    fn all_band_never_constrains() {
        assert_eq!(PriceBand::All.house_bounds(), (None, None));
        assert_eq!(SurfaceBand::All.bounds(), (None, None));
        assert!(PriceBand::All.matches_house(1));
        assert!(PriceBand::All.matches_house(i64::MAX));
    }

    #[test]
    fn count_filters_accept_any_or_a_positive_number() {
        let filters: HouseFilterDto =
            serde_json::from_value(serde_json::json!({ "price": "low", "bedrooms": "3" }))
                .unwrap();
        assert_eq!(filters.price, PriceBand::Low);
        assert_eq!(filters.bedrooms, Some(3));
        assert_eq!(filters.bathrooms, None);

        let filters: HouseFilterDto =
            serde_json::from_value(serde_json::json!({ "bedrooms": "any", "parking": "2" }))
                .unwrap();
        assert_eq!(filters.price, PriceBand::All);
        assert_eq!(filters.bedrooms, None);
        assert_eq!(filters.parking, Some(2));

        assert!(serde_json::from_value::<HouseFilterDto>(
            serde_json::json!({ "bedrooms": "lots" })
        )
        .is_err());
        assert!(
            serde_json::from_value::<HouseFilterDto>(serde_json::json!({ "bedrooms": "0" }))
                .is_err()
        );
    }

    #[test]
    fn filters_resolve_to_range_bounds() {
        let filters = HouseFilterDto {
            price: PriceBand::Mid,
            bedrooms: Some(2),
            bathrooms: None,
            parking: None,
        };
        let search = filters.to_search_filters();
        assert_eq!(search.price_over_cents, Some(HOUSE_PRICE_LOW_MAX_CENTS));
        assert_eq!(search.price_up_to_cents, Some(HOUSE_PRICE_MID_MAX_CENTS));
        assert_eq!(search.min_bedrooms, Some(2));

        let filters = LandFilterDto {
            price: PriceBand::High,
            surface: SurfaceBand::Small,
        };
        let search = filters.to_search_filters();
        assert_eq!(search.price_over_cents, Some(LAND_PRICE_MID_MAX_CENTS));
        assert_eq!(search.price_up_to_cents, None);
        assert_eq!(search.surface_up_to_m2, Some(SURFACE_SMALL_MAX_M2));
    }
}
