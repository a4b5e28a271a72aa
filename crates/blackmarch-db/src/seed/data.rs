//! Static seed records.

use blackmarch_commerce::catalog::{CategoryType, ProductFormat};

pub struct SeedCategory {
    pub name: &'static str,
    pub category_type: CategoryType,
    pub description: &'static str,
}

pub struct SeedProduct {
    pub name: &'static str,
    pub artist: &'static str,
    pub format: ProductFormat,
    pub genre: &'static str,
    pub subgenre: &'static str,
    pub price: f64,
    pub description: &'static str,
    pub in_stock: bool,
    pub year: Option<i32>,
    pub label: Option<&'static str>,
    pub limited: bool,
}

/// Image assignment applied to every product with the given name.
pub struct ImageUpdate {
    pub name: &'static str,
    pub image: &'static str,
}

const fn format(name: &'static str, description: &'static str) -> SeedCategory {
    SeedCategory {
        name,
        category_type: CategoryType::RecordFormat,
        description,
    }
}

const fn genre(name: &'static str, description: &'static str) -> SeedCategory {
    SeedCategory {
        name,
        category_type: CategoryType::MusicGenre,
        description,
    }
}

const fn image(name: &'static str, image: &'static str) -> ImageUpdate {
    ImageUpdate { name, image }
}

pub const RECORD_FORMATS: [SeedCategory; 6] = [
    format("Vinyl", "Black vinyl records"),
    format("CD", "Compact discs"),
    format("Cassette", "Tape cassettes"),
    format("Shirt", "Band t-shirts"),
    format("Patch", "Embroidered patches"),
    format("Accessory", "Other merchandise"),
];

pub const MUSIC_GENRES: [SeedCategory; 13] = [
    genre("Black Metal", "Traditional black metal"),
    genre("Raw Black Metal", "Lo-fi black metal"),
    genre("Symphonic Black Metal", "Orchestral black metal"),
    genre("Ambient Black Metal", "Atmospheric black metal"),
    genre("Norwegian Black Metal", "Norwegian style black metal"),
    genre("Swedish Black Metal", "Swedish style black metal"),
    genre("Folk Black Metal", "Folk influenced black metal"),
    genre("Depressive Black Metal", "DSBM - depressive suicidal black metal"),
    genre("National Socialist Black Metal", "NSBM genre"),
    genre("Blackened Death Metal", "Black metal mixed with death metal"),
    genre("Viking Metal", "Norse mythology themed metal"),
    genre("Pagan Metal", "Pagan themed metal"),
    genre("Merchandise", "Band merchandise"),
];

pub const BASE_PRODUCTS: [SeedProduct; 6] = [
    SeedProduct {
        name: "Transilvanian Hunger",
        artist: "Darkthrone",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Raw Black Metal",
        price: 45.0,
        description: "Kult album dari pionir black metal Norwegia",
        in_stock: true,
        year: Some(1994),
        label: Some("Peaceville Records"),
        limited: true,
    },
    SeedProduct {
        name: "De Mysteriis Dom Sathanas",
        artist: "Mayhem",
        format: ProductFormat::Cd,
        genre: "Black Metal",
        subgenre: "Norwegian Black Metal",
        price: 25.0,
        description: "Album legendaris yang mengubah sejarah black metal",
        in_stock: true,
        year: Some(1994),
        label: Some("Deathlike Silence"),
        limited: false,
    },
    SeedProduct {
        name: "Filosofem",
        artist: "Burzum",
        format: ProductFormat::Cassette,
        genre: "Black Metal",
        subgenre: "Ambient Black Metal",
        price: 15.0,
        description: "Masterpiece ambient black metal",
        in_stock: true,
        year: Some(1996),
        label: None,
        limited: true,
    },
    SeedProduct {
        name: "In the Nightside Eclipse",
        artist: "Emperor",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Symphonic Black Metal",
        price: 50.0,
        description: "Symphonic black metal yang epik",
        in_stock: false,
        year: Some(1994),
        label: Some("Candlelight Records"),
        limited: false,
    },
    SeedProduct {
        name: "Black Metal Logo Shirt",
        artist: "Various",
        format: ProductFormat::Shirt,
        genre: "Merchandise",
        subgenre: "Clothing",
        price: 30.0,
        description: "Kaos dengan logo band black metal klasik",
        in_stock: true,
        year: None,
        label: None,
        limited: false,
    },
    SeedProduct {
        name: "Bathory Patch",
        artist: "Bathory",
        format: ProductFormat::Patch,
        genre: "Merchandise",
        subgenre: "Accessories",
        price: 8.0,
        description: "Patch emblem Bathory untuk jaket kulit",
        in_stock: true,
        year: None,
        label: None,
        limited: false,
    },
];

pub const EXTRA_PRODUCTS: [SeedProduct; 12] = [
    SeedProduct {
        name: "Under a Funeral Moon",
        artist: "Darkthrone",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Raw Black Metal",
        price: 48.0,
        description: "Raw and cold Norwegian black metal masterpiece",
        in_stock: true,
        year: Some(1993),
        label: Some("Peaceville Records"),
        limited: true,
    },
    SeedProduct {
        name: "Anthems to the Welkin at Dusk",
        artist: "Emperor",
        format: ProductFormat::Cd,
        genre: "Black Metal",
        subgenre: "Symphonic Black Metal",
        price: 22.0,
        description: "Epic symphonic black metal from Norway",
        in_stock: true,
        year: Some(1997),
        label: Some("Candlelight Records"),
        limited: false,
    },
    SeedProduct {
        name: "Hvis Lyset Tar Oss",
        artist: "Burzum",
        format: ProductFormat::Cassette,
        genre: "Black Metal",
        subgenre: "Ambient Black Metal",
        price: 18.0,
        description: "Atmospheric black metal journey",
        in_stock: true,
        year: Some(1994),
        label: None,
        limited: true,
    },
    SeedProduct {
        name: "Deathcrush",
        artist: "Mayhem",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Norwegian Black Metal",
        price: 55.0,
        description: "Brutal early Mayhem EP",
        in_stock: false,
        year: Some(1987),
        label: Some("Posercorpse"),
        limited: true,
    },
    SeedProduct {
        name: "Bergtatt",
        artist: "Ulver",
        format: ProductFormat::Cd,
        genre: "Black Metal",
        subgenre: "Folk Black Metal",
        price: 20.0,
        description: "Norwegian folk-influenced black metal",
        in_stock: true,
        year: Some(1995),
        label: Some("Head Not Found"),
        limited: false,
    },
    SeedProduct {
        name: "Stormblåst",
        artist: "Dimmu Borgir",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Symphonic Black Metal",
        price: 42.0,
        description: "Classic Norwegian symphonic black metal",
        in_stock: true,
        year: Some(1996),
        label: Some("Cacophonous Records"),
        limited: false,
    },
    SeedProduct {
        name: "In the Nightside Eclipse",
        artist: "Emperor",
        format: ProductFormat::Shirt,
        genre: "Merchandise",
        subgenre: "Clothing",
        price: 35.0,
        description: "Emperor album artwork t-shirt",
        in_stock: true,
        year: None,
        label: None,
        limited: false,
    },
    SeedProduct {
        name: "Mayhem Logo Patch",
        artist: "Mayhem",
        format: ProductFormat::Patch,
        genre: "Merchandise",
        subgenre: "Accessories",
        price: 10.0,
        description: "Woven Mayhem logo patch",
        in_stock: true,
        year: None,
        label: None,
        limited: false,
    },
    SeedProduct {
        name: "Filosofem",
        artist: "Burzum",
        format: ProductFormat::Vinyl,
        genre: "Black Metal",
        subgenre: "Ambient Black Metal",
        price: 52.0,
        description: "Minimalist ambient black metal masterpiece",
        in_stock: true,
        year: Some(1996),
        label: Some("Misanthropy Records"),
        limited: true,
    },
    SeedProduct {
        name: "De Mysteriis Dom Sathanas",
        artist: "Mayhem",
        format: ProductFormat::Shirt,
        genre: "Merchandise",
        subgenre: "Clothing",
        price: 32.0,
        description: "Classic Mayhem album cover shirt",
        in_stock: true,
        year: None,
        label: None,
        limited: false,
    },
    SeedProduct {
        name: "Nattens Madrigal",
        artist: "Ulver",
        format: ProductFormat::Cassette,
        genre: "Black Metal",
        subgenre: "Raw Black Metal",
        price: 16.0,
        description: "Ulver's rawest black metal album",
        in_stock: true,
        year: Some(1997),
        label: Some("Century Media"),
        limited: false,
    },
    SeedProduct {
        name: "Dark Medieval Times",
        artist: "Satyricon",
        format: ProductFormat::Cd,
        genre: "Black Metal",
        subgenre: "Folk Black Metal",
        price: 19.0,
        description: "Medieval-themed Norwegian black metal",
        in_stock: true,
        year: Some(1994),
        label: Some("Moonfog Productions"),
        limited: false,
    },
];

pub const IMAGE_UPDATES: [ImageUpdate; 18] = [
    image("Transilvanian Hunger", "/covers/darkthrone-transilvanian.jpg"),
    image("De Mysteriis Dom Sathanas", "/covers/mayhem-de-mysteriis.jpg"),
    image("Filosofem", "/covers/burzum-filosofem.jpg"),
    image("In the Nightside Eclipse", "/covers/emperor-nightside.jpg"),
    image("Black Metal Logo Shirt", "/covers/black-metal-shirt.jpg"),
    image("Bathory Patch", "/covers/bathory-patch.jpg"),
    image("Under a Funeral Moon", "/covers/darkthrone-transilvanian.jpg"),
    image("Anthems to the Welkin at Dusk", "/covers/emperor-nightside.jpg"),
    image("Hvis Lyset Tar Oss", "/covers/burzum-filosofem.jpg"),
    image("Deathcrush", "/covers/mayhem-de-mysteriis.jpg"),
    image("Bergtatt", "/covers/burzum-filosofem.jpg"),
    image("Stormblåst", "/covers/emperor-nightside.jpg"),
    image("In the Nightside Eclipse", "/covers/emperor-nightside.jpg"),
    image("Mayhem Logo Patch", "/covers/bathory-patch.jpg"),
    image("Filosofem", "/covers/burzum-filosofem.jpg"),
    image("De Mysteriis Dom Sathanas", "/covers/mayhem-de-mysteriis.jpg"),
    image("Nattens Madrigal", "/covers/burzum-filosofem.jpg"),
    image("Dark Medieval Times", "/covers/darkthrone-transilvanian.jpg"),
];

pub const COVER_UPDATES: [ImageUpdate; 7] = [
    image("Under a Funeral Moon", "/covers/darkthrone-funeral.jpg"),
    image("Bergtatt", "/covers/ulver-bergtatt.jpg"),
    image("Stormblåst", "/covers/dimmu-stormblast.jpg"),
    image("Anthems to the Welkin at Dusk", "/covers/emperor-nightside.jpg"),
    image("Deathcrush", "/covers/mayhem-de-mysteriis.jpg"),
    image("Nattens Madrigal", "/covers/ulver-bergtatt.jpg"),
    image("Dark Medieval Times", "/covers/darkthrone-funeral.jpg"),
];
