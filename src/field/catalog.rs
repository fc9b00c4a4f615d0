//! Logo catalog
//!
//! Names double as asset stems: `/assets/logos/{name}.webp`.

use rand::Rng;
use rand::seq::SliceRandom;

/// Every logo the field can show
pub const LOGO_CATALOG: &[&str] = &[
    "netflix", "spotify", "youtube-premium", "disney-plus", "chatgpt", "claude",
    "github", "apple-music", "apple-one", "apple-tv-plus", "amazon-prime",
    "telegram", "discord", "hbo-max", "crunchyroll", "nord-vpn", "proton",
    "adobe", "aws", "deezer", "twitch", "patreon", "medium", "mega",
    "surfshark", "express-vpn", "google-one", "hulu", "paramount-plus",
    "digital-ocean", "vercel", "heroku", "render", "tailscale", "warp",
    "kagi", "sketch", "tidal", "boosty", "psn", "xbox",
    "kinopoisk", "ivi", "okko", "yandex-plus", "discovery-plus",
    "adguard", "namecheap", "porkbun", "hostinger", "vultr", "linode",
];

/// Catalog in an order drawn from `rng`
pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let mut names = LOGO_CATALOG.to_vec();
    names.shuffle(rng);
    names
}

/// Asset path for a logo name
pub fn asset_path(name: &str) -> String {
    format!("/assets/logos/{}.webp", name)
}
