#![allow(dead_code)]

use courier_core::{Endpoint, http_service};
use http::uri::Scheme;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct Vote {
    image_id: String,
    value: i8,
}

struct BreedImages;

#[http_service]
trait DogCeo {
    /// Random images of a breed.
    #[get("/breed/{breed}/images/random/{count}")]
    fn random_images(&self, breed: &str, count: u8) -> BreedImages;

    #[get("/breeds/list")]
    fn list_breeds(&self, sub_breeds: bool);

    #[post("/votes")]
    fn vote(&self, vote: Vote);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().pretty().init();

    let endpoint = Endpoint::builder()
        .with_scheme(Scheme::HTTPS)
        .with_host("dog.ceo")
        .with_port(443)
        .with_base_path("/api")?
        .build()?;
    let requests = DogCeoRequests::new()?;

    let images = requests.random_images("hound", &3)?;
    let breeds = requests.list_breeds(&true)?;
    let vote = requests.vote(&Vote {
        image_id: "hound-afghan/n02088094_1003.jpg".to_string(),
        value: 1,
    })?;

    for request in [images, breeds, vote] {
        let http_request = endpoint.to_http_request(&request)?;
        println!("{} {}", http_request.method(), http_request.url());
    }

    Ok(())
}
