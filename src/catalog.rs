//! Featured products offered by the assistant, in rotation order.

use crate::types::FeaturedProduct;

/// Rotated through one entry per suggestion, wrapping at the end.
pub const FEATURED_PRODUCTS: &[FeaturedProduct] = &[
    FeaturedProduct {
        name: "Silent Stealth",
        slug: "silent-stealth-keyboards-006",
        category: "keyboards",
        price_cents: 14999,
        image: "/images/keyboards/silent-stealth.png",
        tagline: "dampened all the way down for quiet late-night typing",
    },
    FeaturedProduct {
        name: "PBT Thick Caps",
        slug: "pbt-thick-caps-keycaps-006",
        category: "keycaps",
        price_cents: 8999,
        image: "/images/keycaps/pbt-thick-caps.png",
        tagline: "double-thick PBT that never picks up shine",
    },
    FeaturedProduct {
        name: "Holy Panda",
        slug: "holy-panda-switches-009",
        category: "switches",
        price_cents: 149,
        image: "/images/switches/holy-panda.png",
        tagline: "the tactile bump everyone keeps talking about",
    },
    FeaturedProduct {
        name: "Coiled USB-C Pro",
        slug: "coiled-usb-c-pro-cables-001",
        category: "cables",
        price_cents: 4999,
        image: "/images/cables/coiled-usb-c-pro.png",
        tagline: "aviator coil with a sleeve to match your board",
    },
    FeaturedProduct {
        name: "Wrist Rest Ergonomic",
        slug: "wrist-rest-ergonomic-accessories-001",
        category: "accessories",
        price_cents: 3499,
        image: "/images/accessories/wrist-rest-ergonomic.png",
        tagline: "walnut rest that keeps long sessions comfortable",
    },
    FeaturedProduct {
        name: "Premium Aluminum",
        slug: "premium-aluminum-keyboards-008",
        category: "keyboards",
        price_cents: 124900,
        image: "/images/keyboards/premium-aluminum.png",
        tagline: "a CNC-milled case heavy enough to anchor your desk",
    },
];
