//! Image lookup seam for the landmark and art generators.
use serde::{Deserialize, Serialize};

use crate::city::City;
use crate::clues::is_generic_landmark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSubject {
    Landmark,
    Art,
}

/// Resolves representative images for a city.
///
/// `None` is a soft failure (lookup unavailable); generators report it as
/// "no clue" so another type is tried.
pub trait ImageSource {
    fn images_for(&self, city: &City, subject: ImageSubject, limit: usize)
    -> Option<Vec<String>>;
}

/// Serves the image URLs embedded in the city dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogImages;

impl ImageSource for CatalogImages {
    fn images_for(
        &self,
        city: &City,
        subject: ImageSubject,
        limit: usize,
    ) -> Option<Vec<String>> {
        let urls: Vec<String> = match subject {
            ImageSubject::Landmark => {
                let (generic, distinctive): (Vec<_>, Vec<_>) = city
                    .details
                    .landmarks
                    .iter()
                    .partition(|landmark| is_generic_landmark(&landmark.name));
                distinctive
                    .into_iter()
                    .chain(generic)
                    .filter_map(|landmark| landmark.image_url.clone())
                    .take(limit)
                    .collect()
            }
            ImageSubject::Art => city
                .details
                .art
                .iter()
                .filter_map(|art| art.image_url.clone())
                .take(limit)
                .collect(),
        };
        (!urls.is_empty()).then_some(urls)
    }
}

/// Source that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn images_for(&self, _city: &City, _subject: ImageSubject, _limit: usize) -> Option<Vec<String>> {
        None
    }
}
