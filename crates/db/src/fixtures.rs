use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use catalog_core::catalog::{Catalog, ProductStore};
use catalog_core::domain::product::NewProduct;
use catalog_core::errors::StorageError;

/// Sample catalog entries covering two categories and four brands.
const SAMPLE_PRODUCTS: &[SampleProductContract] = &[
    SampleProductContract {
        name: "Samsung Galaxy S23",
        brand: "Samsung",
        category: "Smartphones",
        price_cents: 99_999,
        rating: 4.5,
        image_url: "https://images.samsung.com/is/image/samsung/p6pim/ar/2302/gallery/ar-galaxy-s23-s911-sm-s911bzaaaro-534851967",
        description: "Smartphone premium con cámara de 50MP y pantalla AMOLED de 6.1 pulgadas",
        specs: &[
            ("screen_size", "6.1 inches"),
            ("storage", "128GB"),
            ("ram", "8GB"),
            ("camera", "50MP"),
            ("battery", "3900mAh"),
            ("processor", "Snapdragon 8 Gen 2"),
        ],
    },
    SampleProductContract {
        name: "iPhone 15",
        brand: "Apple",
        category: "Smartphones",
        price_cents: 119_999,
        rating: 4.7,
        image_url: "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/iphone-15-finish-select-202309-6-1inch-blue",
        description: "iPhone con chip A17 Pro y cámara principal de 48MP",
        specs: &[
            ("screen_size", "6.1 inches"),
            ("storage", "128GB"),
            ("ram", "8GB"),
            ("camera", "48MP"),
            ("battery", "3349mAh"),
            ("processor", "A17 Pro"),
        ],
    },
    SampleProductContract {
        name: "MacBook Air M2",
        brand: "Apple",
        category: "Laptops",
        price_cents: 149_999,
        rating: 4.8,
        image_url: "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/macbook-air-midnight-select-20220606",
        description: "Laptop ultradelgada con chip M2 y pantalla Liquid Retina de 13.6 pulgadas",
        specs: &[
            ("screen_size", "13.6 inches"),
            ("storage", "256GB SSD"),
            ("ram", "8GB"),
            ("processor", "Apple M2"),
            ("battery", "18 hours"),
            ("weight", "1.24 kg"),
        ],
    },
    SampleProductContract {
        name: "Google Pixel 8",
        brand: "Google",
        category: "Smartphones",
        price_cents: 89_999,
        rating: 4.4,
        image_url: "https://lh3.googleusercontent.com/RMkx7Ap8nZhGHqDv8C_a5c8oEjnM_Zqp5GVRU1v7o2g",
        description: "Smartphone con IA avanzada y cámara computacional",
        specs: &[
            ("screen_size", "6.2 inches"),
            ("storage", "128GB"),
            ("ram", "8GB"),
            ("camera", "50MP"),
            ("battery", "4575mAh"),
            ("processor", "Tensor G3"),
        ],
    },
    SampleProductContract {
        name: "Dell XPS 13",
        brand: "Dell",
        category: "Laptops",
        price_cents: 129_999,
        rating: 4.3,
        image_url: "https://i.dell.com/is/image/DellContent/content/dam/ss2/product-images/dell-client-products/notebooks/xps-notebooks/xps-13-9315",
        description: "Laptop ultraportátil con pantalla InfinityEdge y procesador Intel",
        specs: &[
            ("screen_size", "13.4 inches"),
            ("storage", "512GB SSD"),
            ("ram", "16GB"),
            ("processor", "Intel i7-1250U"),
            ("battery", "12 hours"),
            ("weight", "1.17 kg"),
        ],
    },
];

struct SampleProductContract {
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    price_cents: i64,
    rating: f64,
    image_url: &'static str,
    description: &'static str,
    specs: &'static [(&'static str, &'static str)],
}

impl SampleProductContract {
    fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            category: self.category.to_string(),
            price: Decimal::new(self.price_cents, 2),
            image_url: Some(self.image_url.to_string()),
            description: Some(self.description.to_string()),
            rating: Some(self.rating),
            specs: self
                .specs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

/// Sample product dataset used for local development and demos.
pub struct SampleCatalog;

impl SampleCatalog {
    pub fn products() -> Vec<NewProduct> {
        SAMPLE_PRODUCTS.iter().map(SampleProductContract::to_new_product).collect()
    }

    /// Inserts the sample products only when the store holds no products.
    pub async fn seed_if_empty<S: ProductStore + ?Sized>(
        catalog: &Catalog<S>,
    ) -> Result<SeedResult, StorageError> {
        let existing = catalog.list_all().await?.len();
        if existing > 0 {
            info!(
                event_name = "catalog.seed.skipped",
                existing_products = existing,
                "store already holds products, sample catalog not seeded"
            );
            return Ok(SeedResult { inserted: Vec::new(), existing_products: existing });
        }

        let mut inserted = Vec::with_capacity(SAMPLE_PRODUCTS.len());
        for product in Self::products() {
            let stored = catalog.create(product).await?;
            inserted.push(SeededProduct { id: stored.id.0, name: stored.name });
        }

        info!(
            event_name = "catalog.seed.completed",
            inserted = inserted.len(),
            "sample catalog seeded"
        );

        Ok(SeedResult { inserted, existing_products: 0 })
    }

    /// Checks that every sample product is present by name.
    pub async fn verify<S: ProductStore + ?Sized>(
        catalog: &Catalog<S>,
    ) -> Result<VerificationResult, StorageError> {
        let products = catalog.list_all().await?;
        let checks = SAMPLE_PRODUCTS
            .iter()
            .map(|sample| {
                let present = products.iter().any(|product| product.name == sample.name);
                (sample.name, present)
            })
            .collect::<Vec<_>>();
        let all_present = checks.iter().all(|(_, present)| *present);

        Ok(VerificationResult { all_present, checks })
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub inserted: Vec<SeededProduct>,
    pub existing_products: usize,
}

impl SeedResult {
    pub fn seeded(&self) -> bool {
        !self.inserted.is_empty()
    }
}

#[derive(Debug)]
pub struct SeededProduct {
    pub id: String,
    pub name: String,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
