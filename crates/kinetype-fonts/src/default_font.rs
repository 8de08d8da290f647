//! Built-in block font (7 rows tall, 1-5 columns wide).

/// Glyph art for the default font, keyed by character.
pub const DEFAULT_FONT: &[(char, [&str; 7])] = &[
    ('A', [" ███ ", "█   █", "█   █", "█████", "█   █", "█   █", "█   █"]),
    ('B', ["████ ", "█   █", "█   █", "████ ", "█   █", "█   █", "████ "]),
    ('C', [" ███ ", "█   █", "█    ", "█    ", "█    ", "█   █", " ███ "]),
    ('D', ["████ ", "█   █", "█   █", "█   █", "█   █", "█   █", "████ "]),
    ('E', ["█████", "█    ", "█    ", "████ ", "█    ", "█    ", "█████"]),
    ('F', ["█████", "█    ", "█    ", "████ ", "█    ", "█    ", "█    "]),
    ('G', [" ███ ", "█   █", "█    ", "█ ███", "█   █", "█   █", " ████"]),
    ('H', ["█   █", "█   █", "█   █", "█████", "█   █", "█   █", "█   █"]),
    ('I', ["███", " █ ", " █ ", " █ ", " █ ", " █ ", "███"]),
    ('J', ["  ███", "    █", "    █", "    █", "█   █", "█   █", " ███ "]),
    ('K', ["█   █", "█  █ ", "█ █  ", "██   ", "█ █  ", "█  █ ", "█   █"]),
    ('L', ["█    ", "█    ", "█    ", "█    ", "█    ", "█    ", "█████"]),
    ('M', ["█   █", "██ ██", "█ █ █", "█ █ █", "█   █", "█   █", "█   █"]),
    ('N', ["█   █", "██  █", "█ █ █", "█  ██", "█   █", "█   █", "█   █"]),
    ('O', [" ███ ", "█   █", "█   █", "█   █", "█   █", "█   █", " ███ "]),
    ('P', ["████ ", "█   █", "█   █", "████ ", "█    ", "█    ", "█    "]),
    ('Q', [" ███ ", "█   █", "█   █", "█   █", "█ █ █", "█  █ ", " ██ █"]),
    ('R', ["████ ", "█   █", "█   █", "████ ", "█ █  ", "█  █ ", "█   █"]),
    ('S', [" ████", "█    ", "█    ", " ███ ", "    █", "    █", "████ "]),
    ('T', ["█████", "  █  ", "  █  ", "  █  ", "  █  ", "  █  ", "  █  "]),
    ('U', ["█   █", "█   █", "█   █", "█   █", "█   █", "█   █", " ███ "]),
    ('V', ["█   █", "█   █", "█   █", "█   █", "█   █", " █ █ ", "  █  "]),
    ('W', ["█   █", "█   █", "█   █", "█ █ █", "█ █ █", "██ ██", "█   █"]),
    ('X', ["█   █", "█   █", " █ █ ", "  █  ", " █ █ ", "█   █", "█   █"]),
    ('Y', ["█   █", "█   █", " █ █ ", "  █  ", "  █  ", "  █  ", "  █  "]),
    ('Z', ["█████", "    █", "   █ ", "  █  ", " █   ", "█    ", "█████"]),
    ('0', [" ███ ", "█   █", "█  ██", "█ █ █", "██  █", "█   █", " ███ "]),
    ('1', ["  █  ", " ██  ", "  █  ", "  █  ", "  █  ", "  █  ", " ███ "]),
    ('2', [" ███ ", "█   █", "    █", "   █ ", "  █  ", " █   ", "█████"]),
    ('3', ["████ ", "    █", "    █", " ███ ", "    █", "    █", "████ "]),
    ('4', ["   █ ", "  ██ ", " █ █ ", "█  █ ", "█████", "   █ ", "   █ "]),
    ('5', ["█████", "█    ", "████ ", "    █", "    █", "█   █", " ███ "]),
    ('6', [" ███ ", "█    ", "█    ", "████ ", "█   █", "█   █", " ███ "]),
    ('7', ["█████", "    █", "   █ ", "  █  ", "  █  ", "  █  ", "  █  "]),
    ('8', [" ███ ", "█   █", "█   █", " ███ ", "█   █", "█   █", " ███ "]),
    ('9', [" ███ ", "█   █", "█   █", " ████", "    █", "    █", " ███ "]),
    (' ', ["   ", "   ", "   ", "   ", "   ", "   ", "   "]),
    ('\'', ["█", "█", " ", " ", " ", " ", " "]),
    ('"', ["█ █", "█ █", "   ", "   ", "   ", "   ", "   "]),
    ('.', [" ", " ", " ", " ", " ", " ", "█"]),
    (',', ["  ", "  ", "  ", "  ", "  ", " █", "█ "]),
    ('!', ["█", "█", "█", "█", "█", " ", "█"]),
    ('?', [" ███ ", "█   █", "    █", "   █ ", "  █  ", "     ", "  █  "]),
    ('-', ["   ", "   ", "   ", "███", "   ", "   ", "   "]),
    ('_', ["     ", "     ", "     ", "     ", "     ", "     ", "█████"]),
    (':', [" ", "█", " ", " ", " ", "█", " "]),
    ('+', ["     ", "  █  ", "  █  ", "█████", "  █  ", "  █  ", "     "]),
    ('=', ["     ", "     ", "█████", "     ", "█████", "     ", "     "]),
    ('/', ["    █", "    █", "   █ ", "  █  ", " █   ", "█    ", "█    "]),
    ('(', ["  █", " █ ", "█  ", "█  ", "█  ", " █ ", "  █"]),
    (')', ["█  ", " █ ", "  █", "  █", "  █", " █ ", "█  "]),
    ('&', [" ██  ", "█  █ ", "█ █  ", " █   ", "█ █ █", "█  █ ", " ██ █"]),
    ('@', [" ███ ", "█   █", "█ ███", "█ █ █", "█ ███", "█    ", " ███ "]),
    ('#', [" █ █ ", " █ █ ", "█████", " █ █ ", "█████", " █ █ ", " █ █ "]),
];
