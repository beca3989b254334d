/// The fixed bank used by [`Alphabet::Words`](tokenattr_core::Alphabet::Words).
///
/// Capitalized so concatenated words stay readable, e.g. `"AmberFalconRiver"`.
pub const WORDS_BANK: &[&str] = &[
    "Acorn", "Amber", "Anchor", "Apple", "Arrow", "Aspen", "Atlas", "Autumn", "Badger", "Bamboo",
    "Basil", "Beacon", "Birch", "Bison", "Blossom", "Breeze", "Brook", "Cactus", "Canyon",
    "Cedar", "Cherry", "Cinder", "Clover", "Cobalt", "Comet", "Copper", "Coral", "Cosmos",
    "Cotton", "Crane", "Crystal", "Cypress", "Dahlia", "Delta", "Desert", "Dune", "Eagle", "Echo",
    "Ember", "Falcon", "Fern", "Fjord", "Flint", "Forest", "Fox", "Frost", "Galaxy", "Garnet",
    "Ginger", "Glacier", "Granite", "Grove", "Harbor", "Hazel", "Heron", "Hollow", "Honey",
    "Indigo", "Iris", "Island", "Ivory", "Jade", "Jasper", "Juniper", "Kelp", "Kestrel", "Lagoon",
    "Lantern", "Lark", "Laurel", "Lemon", "Lilac", "Lotus", "Lunar", "Maple", "Marble", "Meadow",
    "Mesa", "Mint", "Mist", "Moss", "Nectar", "Nova", "Oak", "Ocean", "Olive", "Onyx", "Opal",
    "Orchid", "Otter", "Pebble", "Pepper", "Pine", "Planet", "Plum", "Prairie", "Quartz", "Quill",
    "Rain", "Raven", "Reed", "Ridge", "River", "Robin", "Ruby", "Saffron", "Sage", "Sand",
    "Sequoia", "Shadow", "Sierra", "Silver", "Sparrow", "Spruce", "Star", "Stone", "Summit",
    "Thistle", "Thunder", "Tide", "Timber", "Topaz", "Tulip", "Valley", "Velvet", "Willow",
    "Winter", "Zephyr",
];
