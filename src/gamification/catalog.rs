use crate::config::levels::VETERAN_DAYS;
use crate::types::{Achievement, AchievementKind, Badge, BadgeRule};

pub static BADGES: [Badge; 8] = [
    Badge {
        id: "first_listing",
        name: "Första annonsen",
        description: "Lade upp din första annons",
        icon: "📻",
        rule: BadgeRule::MinListings(1),
    },
    Badge {
        id: "seller_rookie",
        name: "Nybliven säljare",
        description: "Genomförde din första försäljning",
        icon: "🤝",
        rule: BadgeRule::MinSales(1),
    },
    Badge {
        id: "buyer_rookie",
        name: "Nybliven köpare",
        description: "Genomförde ditt första köp",
        icon: "🛒",
        rule: BadgeRule::MinPurchases(1),
    },
    Badge {
        id: "power_seller",
        name: "Storsäljare",
        description: "Sålt minst 10 produkter",
        icon: "⚡",
        rule: BadgeRule::MinSales(10),
    },
    Badge {
        id: "trusted_buyer",
        name: "Pålitlig köpare",
        description: "Genomfört minst 5 köp",
        icon: "🛡️",
        rule: BadgeRule::MinPurchases(5),
    },
    Badge {
        id: "five_star_seller",
        name: "Femstjärnig säljare",
        description: "Snittbetyg på minst 4,5",
        icon: "⭐",
        rule: BadgeRule::MinRating(4.5),
    },
    Badge {
        id: "veteran",
        name: "Veteran",
        description: "Medlem i mer än ett år",
        icon: "🎖️",
        rule: BadgeRule::AccountAgeDays(VETERAN_DAYS),
    },
    Badge {
        id: "social_butterfly",
        name: "Social fjäril",
        description: "Aktiv i forumet",
        icon: "🦋",
        rule: BadgeRule::Never,
    },
];

pub static ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: "listing_5",
        name: "Igång",
        description: "Lägg upp 5 annonser",
        kind: AchievementKind::Listing,
        requirement: 5,
        points: 50,
    },
    Achievement {
        id: "listing_25",
        name: "Samlare",
        description: "Lägg upp 25 annonser",
        kind: AchievementKind::Listing,
        requirement: 25,
        points: 150,
    },
    Achievement {
        id: "listing_100",
        name: "Butiksägare",
        description: "Lägg upp 100 annonser",
        kind: AchievementKind::Listing,
        requirement: 100,
        points: 400,
    },
    Achievement {
        id: "sale_10",
        name: "Handlare",
        description: "Sälj 10 produkter",
        kind: AchievementKind::Sale,
        requirement: 10,
        points: 100,
    },
    Achievement {
        id: "sale_50",
        name: "HiFi-mäklare",
        description: "Sälj 50 produkter",
        kind: AchievementKind::Sale,
        requirement: 50,
        points: 500,
    },
    Achievement {
        id: "purchase_10",
        name: "Entusiast",
        description: "Köp 10 produkter",
        kind: AchievementKind::Purchase,
        requirement: 10,
        points: 100,
    },
    Achievement {
        id: "purchase_50",
        name: "Audiofil",
        description: "Köp 50 produkter",
        kind: AchievementKind::Purchase,
        requirement: 50,
        points: 300,
    },
    Achievement {
        id: "rating_5",
        name: "Toppbetyg",
        description: "Håll ett snittbetyg på 5",
        kind: AchievementKind::Rating,
        requirement: 5,
        points: 250,
    },
];
