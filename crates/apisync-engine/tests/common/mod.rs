#![allow(dead_code)]

use apisync_core::errors::{ExError, ExErrorKind};
use apisync_core::model::{
    DataSource, DataType, Endpoint, HttpMethod, Module, ParamLocation, Parameter, Property,
    SharedType,
};
use apisync_engine::errors::Result;
use apisync_engine::{ApiSyncConfig, DataSourceConfig, RemoteFetcher};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Serves in-memory documents by origin name; swap them between calls to
/// simulate the backend evolving
#[derive(Clone, Default)]
pub struct StubFetcher {
    documents: Arc<Mutex<BTreeMap<String, DataSource>>>,
}

impl StubFetcher {
    pub fn serve(&self, name: &str, ds: DataSource) {
        self.documents.lock().unwrap().insert(name.to_string(), ds);
    }

    pub fn go_offline(&self, name: &str) {
        self.documents.lock().unwrap().remove(name);
    }
}

#[async_trait]
impl RemoteFetcher for StubFetcher {
    async fn fetch(&self, config: &DataSourceConfig) -> Result<DataSource> {
        let served = self.documents.lock().unwrap().get(&config.name).cloned();
        match served {
            Some(mut ds) => {
                ds.name = config.name.clone();
                ds.canonicalize();
                Ok(ds)
            }
            None => Err(ExError::new(ExErrorKind::Fetch)
                .with_op("fetch")
                .with_data_source(config.name.clone())
                .with_message("origin offline")),
        }
    }
}

pub fn config(out_dir: &Path, names: &[&str]) -> ApiSyncConfig {
    let mut text = format!("out_dir = {:?}\n", out_dir.display().to_string());
    for name in names {
        text.push_str(&format!(
            "\n[[origins]]\nname = \"{}\"\nurl = \"{}.json\"\n",
            name, name
        ));
    }
    ApiSyncConfig::from_toml(&text, out_dir).unwrap()
}

/// `pet` with `addPet`, plus `Pet` referencing `Category`
pub fn petstore_v1() -> DataSource {
    DataSource::new("petstore")
        .with_module(
            Module::new("pet")
                .with_description("Pet operations")
                .with_endpoint(
                    Endpoint::new("addPet", HttpMethod::Post, "/pet")
                        .with_description("Add a new pet")
                        .with_body(DataType::shared("Pet"))
                        .with_response(DataType::shared("Pet")),
                ),
        )
        .with_shared_type(
            SharedType::new("Category")
                .with_property(Property::new("id", DataType::primitive("integer"))),
        )
        .with_shared_type(
            SharedType::new("Pet")
                .with_property(Property::new("category", DataType::shared("Category")))
                .with_property(Property::new("name", DataType::primitive("string")).required()),
        )
}

/// v1 plus `pet.deletePet`
pub fn petstore_v2() -> DataSource {
    let mut ds = petstore_v1();
    ds.modules.get_mut("pet").unwrap().endpoints.insert(
        Endpoint::new("deletePet", HttpMethod::Delete, "/pet/{petId}").with_parameter(
            Parameter::new("petId", DataType::primitive("integer"))
                .required()
                .in_location(ParamLocation::Path),
        ),
    );
    ds
}
