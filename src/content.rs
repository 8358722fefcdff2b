// Static content shipped with the app: inspirational quotes, the curated
// healing playlists, and crisis hotline pointers. Read-only, shared by all
// sessions.

use crate::mood::Mood;
use rand::seq::IndexedRandom;

pub const RECOVERY_QUOTES: &[&str] = &[
    "Every ending is a new beginning. \u{1F305}",
    "Healing is not linear, and that's okay. \u{1F49D}",
    "The best revenge is becoming your best self. \u{1F4AA}",
    "This chapter closed so a better one could open. \u{1F4D6}",
    "You deserve someone who chooses you every day. \u{1F31F}",
    "Pain is temporary, but the lessons are forever. \u{1F98B}",
    "Your value doesn't decrease based on someone's inability to see your worth. \u{1F451}",
];

/// Pick one quote at random for the day's header.
pub fn daily_quote() -> &'static str {
    RECOVERY_QUOTES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(RECOVERY_QUOTES[0])
}

#[derive(Debug, Clone, Copy)]
pub struct Song {
    pub title: &'static str,
    pub spotify: &'static str,
    pub youtube: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Playlist {
    pub name: &'static str,
    pub description: &'static str,
    pub songs: &'static [Song],
}

pub static PLAYLISTS: &[Playlist] = &[
    Playlist {
        name: "Sad & Reflective",
        description: "For when you need to feel your emotions and process the pain",
        songs: &[
            Song {
                title: "Someone Like You - Adele",
                spotify: "https://open.spotify.com/track/1zwMYTA5nlNjZxYrvBB2pV",
                youtube: "https://www.youtube.com/watch?v=hLQl3WQQoQ0",
            },
            Song {
                title: "The Night We Met - Lord Huron",
                spotify: "https://open.spotify.com/track/0NdAHF7HvOGZCeaKuJbK9d",
                youtube: "https://www.youtube.com/watch?v=KtlgYxa6BMU",
            },
            Song {
                title: "All Too Well - Taylor Swift",
                spotify: "https://open.spotify.com/track/5enxwA8aAbwZbf5qCHORXi",
                youtube: "https://www.youtube.com/watch?v=tollGa3S0o8",
            },
            Song {
                title: "Drivers License - Olivia Rodrigo",
                spotify: "https://open.spotify.com/track/7lPN2DXiMsVn7XUKtOW1CS",
                youtube: "https://www.youtube.com/watch?v=ZmDBbnmKpqQ",
            },
            Song {
                title: "When The Party's Over - Billie Eilish",
                spotify: "https://open.spotify.com/track/43zdsphuZLzwA9k4DJhU0I",
                youtube: "https://www.youtube.com/watch?v=pbMwTqkKSps",
            },
        ],
    },
    Playlist {
        name: "Angry & Empowered",
        description: "Channel your anger into empowerment and strength",
        songs: &[
            Song {
                title: "Since U Been Gone - Kelly Clarkson",
                spotify: "https://open.spotify.com/track/4TQqhwM4XZfEYSRQOGV6oh",
                youtube: "https://www.youtube.com/watch?v=R7UrFYvl5TE",
            },
            Song {
                title: "Stronger - Kanye West",
                spotify: "https://open.spotify.com/track/4fzsfWzRhPawzqhX8Qt9F3",
                youtube: "https://www.youtube.com/watch?v=PsO6ZnUZI0g",
            },
            Song {
                title: "We Are Never Getting Back Together - Taylor Swift",
                spotify: "https://open.spotify.com/track/5YqltLsjdqFtvqE7Nrysvs",
                youtube: "https://www.youtube.com/watch?v=WA4iX5D9Z64",
            },
            Song {
                title: "Good As Hell - Lizzo",
                spotify: "https://open.spotify.com/track/3HVWdVOQ0ZA45FuZGSfvns",
                youtube: "https://www.youtube.com/watch?v=SmbmeOgWsqE",
            },
            Song {
                title: "Truth Hurts - Lizzo",
                spotify: "https://open.spotify.com/track/5qmq61PeM4Y5dSQiYn9l1p",
                youtube: "https://www.youtube.com/watch?v=P00HMxdsVZI",
            },
        ],
    },
    Playlist {
        name: "Healing & Moving On",
        description: "Songs for finding peace and moving forward with confidence",
        songs: &[
            Song {
                title: "Flowers - Miley Cyrus",
                spotify: "https://open.spotify.com/track/0yLdNVWF3Srea0uzk55zFn",
                youtube: "https://www.youtube.com/watch?v=G7KNmW9a75Y",
            },
            Song {
                title: "New Rules - Dua Lipa",
                spotify: "https://open.spotify.com/track/2ekn2ttSfGqwhhate0LSR0",
                youtube: "https://www.youtube.com/watch?v=k2qgadSvNyU",
            },
            Song {
                title: "Survivor - Destiny's Child",
                spotify: "https://open.spotify.com/track/7M9gKngVEKKoSjQS6OU5Ck",
                youtube: "https://www.youtube.com/watch?v=Wmc8bQoL-J0",
            },
            Song {
                title: "Unwritten - Natasha Bedingfield",
                spotify: "https://open.spotify.com/track/6oSXNfHQgziUwfT7E25tBM",
                youtube: "https://www.youtube.com/watch?v=b7k0a5hYnSI",
            },
            Song {
                title: "Fight Song - Rachel Platten",
                spotify: "https://open.spotify.com/track/5ykquqsGJaAO4uxLfRYPIk",
                youtube: "https://www.youtube.com/watch?v=xo1VInw-SKc",
            },
        ],
    },
    Playlist {
        name: "Self-Love Anthems",
        description: "Celebrate yourself and remember your worth",
        songs: &[
            Song {
                title: "Love Myself - Hailee Steinfeld",
                spotify: "https://open.spotify.com/track/6DK3kHsJMD3PpFg83dpm5B",
                youtube: "https://www.youtube.com/watch?v=bMpFmHSgC4Q",
            },
            Song {
                title: "Scars To Your Beautiful - Alessia Cara",
                spotify: "https://open.spotify.com/track/0prNGof3XqfTvNDxHonvdK",
                youtube: "https://www.youtube.com/watch?v=MWASeaYuHZo",
            },
            Song {
                title: "Born This Way - Lady Gaga",
                spotify: "https://open.spotify.com/track/0lPQA9gKoZFvdDHLt5a8LF",
                youtube: "https://www.youtube.com/watch?v=wV1FrqwZyKw",
            },
            Song {
                title: "Confident - Demi Lovato",
                spotify: "https://open.spotify.com/track/1Irgqw8mSjHaEbIXi4nAhN",
                youtube: "https://www.youtube.com/watch?v=cwKgxxYN-_U",
            },
            Song {
                title: "Beautiful - Christina Aguilera",
                spotify: "https://open.spotify.com/track/6bxhCLjZ5N1TLJ0aJesPPQ",
                youtube: "https://www.youtube.com/watch?v=eAfyFTzZDMM",
            },
        ],
    },
];

/// Match a logged mood to the playlist most likely to meet the user where
/// they are. Start where the feeling is, then shift brighter when ready.
pub fn suggested_for(mood: Mood) -> &'static Playlist {
    match mood {
        Mood::Sad => &PLAYLISTS[0],
        Mood::Angry => &PLAYLISTS[1],
        Mood::Okay | Mood::Good => &PLAYLISTS[2],
        Mood::Great => &PLAYLISTS[3],
    }
}

/// Crisis hotline pointers, always shown alongside the chat.
pub const CRISIS_RESOURCES: &[(&str, &str)] = &[
    ("US Crisis Line", "Call or text 988"),
    ("Crisis Text Line", "Text HOME to 741741"),
    ("International", "https://findahelpline.com"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_quote_comes_from_the_fixed_set() {
        for _ in 0..20 {
            assert!(RECOVERY_QUOTES.contains(&daily_quote()));
        }
    }

    #[test]
    fn test_every_playlist_has_five_songs() {
        assert_eq!(PLAYLISTS.len(), 4);
        for playlist in PLAYLISTS {
            assert_eq!(playlist.songs.len(), 5);
        }
    }

    #[test]
    fn test_every_mood_maps_to_a_playlist() {
        for mood in Mood::all() {
            let playlist = suggested_for(*mood);
            assert!(!playlist.songs.is_empty());
        }
        assert_eq!(suggested_for(Mood::Sad).name, "Sad & Reflective");
        assert_eq!(suggested_for(Mood::Great).name, "Self-Love Anthems");
    }
}
