//! The catalog bundled with the binary.

use super::model::{Catalog, Category, Track};

/// (id, title, description, uri, artwork)
type Entry = (&'static str, &'static str, &'static str, &'static str, &'static str);

const AMBIENCE: &[Entry] = &[
    (
        "forest-lullaby",
        "Forest Lullaby",
        "Gentle forest ambience with soft birds and breeze.",
        "https://cdn.pixabay.com/download/audio/2022/03/15/audio_6a2d0a73c3.mp3?filename=forest-lullaby-110624.mp3",
        "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&q=80",
    ),
    (
        "evening-cicadas",
        "Evening Cicadas",
        "Nighttime insects and warm summer air.",
        "https://cdn.pixabay.com/download/audio/2022/10/24/audio_5bcacae4d7.mp3?filename=evening-crickets-ambient-124471.mp3",
        "https://images.unsplash.com/photo-1470252649378-9c29740c9fa8?w=800&q=80",
    ),
    (
        "coastal-breeze",
        "Coastal Breeze",
        "Rolling ocean waves on a calm shore.",
        "https://cdn.pixabay.com/download/audio/2021/09/01/audio_fd5f973ce5.mp3?filename=sea-waves-ambient-9076.mp3",
        "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800&q=80",
    ),
];

const RAIN: &[Entry] = &[
    (
        "gentle-rain",
        "Gentle Rain",
        "Soft rain against a windowpane.",
        "https://cdn.pixabay.com/download/audio/2021/09/15/audio_8a58dd5074.mp3?filename=rain-on-window-ambient-11479.mp3",
        "https://images.unsplash.com/photo-1515694346937-94d85e41e6f0?w=800&q=80",
    ),
    (
        "thunderstorm-calm",
        "Thunderstorm Calm",
        "Distant thunder with steady rainfall.",
        "https://cdn.pixabay.com/download/audio/2022/11/09/audio_9dd98ec605.mp3?filename=storm-thunder-rain-ambient-125075.mp3",
        "https://images.unsplash.com/photo-1605727216801-e27ce1d0cc28?w=800&q=80",
    ),
    (
        "rainforest-downpour",
        "Rainforest Downpour",
        "Lush rainforest rain with wildlife in the distance.",
        "https://cdn.pixabay.com/download/audio/2021/09/18/audio_9b16c94575.mp3?filename=rainforest-ambience-11443.mp3",
        "https://images.unsplash.com/photo-1516026672322-bc52d61a55cd?w=800&q=80",
    ),
];

const MEDITATION: &[Entry] = &[
    (
        "deep-meditation",
        "Deep Meditation",
        "Low drones for deep focus and calm breathing.",
        "https://cdn.pixabay.com/download/audio/2021/12/20/audio_8a58dd5074.mp3?filename=deep-relaxation-ambient-110498.mp3",
        "https://images.unsplash.com/photo-1593811167562-9cef47bfc4d7?w=800&q=80",
    ),
    (
        "singing-bowls",
        "Singing Bowls",
        "Healing singing bowls with delicate overtones.",
        "https://cdn.pixabay.com/download/audio/2021/12/27/audio_7dda5e3aa2.mp3?filename=singing-bowls-ambient-110620.mp3",
        "https://images.unsplash.com/photo-1512438248247-f0f2a5a8b7f0?w=800&q=80",
    ),
    (
        "evening-wind",
        "Evening Wind",
        "Warm wind chimes and glistening pads.",
        "https://cdn.pixabay.com/download/audio/2022/06/27/audio_093346a3b3.mp3?filename=evening-wind-112199.mp3",
        "https://images.unsplash.com/photo-1534237710431-e2fc698436d0?w=800&q=80",
    ),
];

fn category(id: &str, title: &str, entries: &[Entry]) -> Category {
    let tracks = entries
        .iter()
        .map(|&(track_id, track_title, description, uri, artwork)| Track {
            id: track_id.to_string(),
            title: track_title.to_string(),
            category: title.to_string(),
            uri: uri.to_string(),
            artwork: Some(artwork.to_string()),
            description: Some(description.to_string()),
        })
        .collect();

    Category {
        id: id.to_string(),
        title: title.to_string(),
        tracks,
    }
}

impl Catalog {
    /// Ambience, rain and meditation collections.
    pub fn builtin() -> Self {
        Self::new(vec![
            category("ambience", "Ambience", AMBIENCE),
            category("rain", "Rain", RAIN),
            category("meditation", "Meditation", MEDITATION),
        ])
    }
}
