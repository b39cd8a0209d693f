//! Scenario and tip lookup tables keyed by dominant pattern values.
//!
//! Both resolvers are pure functions of a single key over a small fixed
//! vocabulary. Keys match case-sensitively; anything else resolves to the
//! designated default entry.

use crate::domain::models::Scenario;

/// Fallback location when no pattern exists.
pub const DEFAULT_LOCATION: &str = "Hotel";

/// Fallback position tag when no pattern exists.
pub const DEFAULT_POSITION: &str = "Misionero";

fn scenario(ambience: &str, lighting: &str, sound: &str, detail: &str) -> Scenario {
    Scenario {
        ambience: ambience.to_string(),
        lighting: lighting.to_string(),
        sound: sound.to_string(),
        detail: detail.to_string(),
    }
}

/// Resolve the scenario description for the most frequent location.
///
/// Unknown or absent locations resolve to the `Hotel` entry.
pub fn scenario_for(location: Option<&str>) -> Scenario {
    match location {
        Some("Mi casa") => scenario(
            "Familiar, comfortable setting",
            "Full control of the lighting, so you can build the perfect mood",
            "Your favorite playlist, or music you both enjoy",
            "Everything within reach: lubricant, toys, fresh bedding. You can prepare the room ahead of time",
        ),
        Some("Su casa") => scenario(
            "Intimate, personal setting",
            "Ask about their preferences, or suggest low light",
            "Music you both enjoy, or let them choose",
            "Respect their space, but feel free to suggest improvements. Bring your own essentials if needed",
        ),
        Some("Coche") => scenario(
            "Spontaneous, thrilling setting",
            "Darkness, or filtered street light",
            "Car stereo, or silence for discretion",
            "Make sure there is enough room. Find a safe, discreet spot and mind the weather and temperature",
        ),
        Some("Motel") => scenario(
            "Private setting with no distractions",
            "Ambient motel lighting, usually soft",
            "House music, or bring your own",
            "Total privacy. The room is built for intimacy, so use every amenity available",
        ),
        // "Hotel" and everything unknown.
        _ => scenario(
            "Elegant, private setting",
            "Dim light with candles or soft ambient lighting",
            "Soft background music, or intimate silence",
            "Make the most of the hotel amenities: shower together beforehand, use the soft towels, enjoy the spacious room",
        ),
    }
}

fn tips(entries: &[&str]) -> Vec<String> {
    entries.iter().map(ToString::to_string).collect()
}

/// Resolve the ordered tip list for the most frequent position tag.
///
/// Unknown or absent tags resolve to the generic default list.
pub fn tips_for(position: Option<&str>) -> Vec<String> {
    match position {
        Some("Misionero") => tips(&[
            "Place a pillow under your hips for a better angle and comfort",
            "Relax your muscles completely, especially the glutes",
            "Breathe deeply during initial penetration",
            "Communicate your rhythm and preferences clearly",
            "Enjoy the eye contact and intimacy of this position",
        ]),
        Some("Perrito") => tips(&[
            "Arch your back gently for better access",
            "Keep your knees comfortably apart",
            "Use lubricant generously",
            "Relax your neck and shoulders",
            "This position allows greater depth, so communicate your limits",
        ]),
        Some("Cowgirl") => tips(&[
            "You control the pace and the depth",
            "Start slow and build up gradually",
            "Use your thighs to steer the movement",
            "Lean forward or backward to vary the angle",
            "Enjoy the control and the sense of power",
        ]),
        Some("Cowgirl inversa") => tips(&[
            "Excellent for prostate stimulation",
            "Control the rhythm with your hips",
            "Keep your balance using your hands",
            "Shift your body to vary the angle",
            "Say so if you need to adjust the position",
        ]),
        Some("Cucharita") => tips(&[
            "Settle in close; this position favors comfort",
            "Perfect for longer sessions",
            "Allows full body contact",
            "Ideal for starting or finishing",
            "Enjoy the closeness and body warmth",
        ]),
        Some("De pie") => tips(&[
            "Requires good communication and balance",
            "Use a wall or a surface for support",
            "Can be more intense, so communicate your limits",
            "Ideal for more spontaneous encounters",
            "Make sure you have plenty of lubrication",
        ]),
        _ => tips(&[
            "Relax your body completely",
            "Communicate your preferences and limits",
            "Use lubricant generously",
            "Breathe deeply",
            "Enjoy the present moment",
        ]),
    }
}
