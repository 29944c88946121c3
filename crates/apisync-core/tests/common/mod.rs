use apisync_core::model::{
    DataSource, DataType, Endpoint, HttpMethod, Module, Parameter, ParamLocation, Property,
    SharedType,
};

/// Endpoint with a path derived from its name and no types
#[allow(dead_code)]
pub fn endpoint(name: &str) -> Endpoint {
    Endpoint::new(name, HttpMethod::Get, format!("/{}", name))
}

#[allow(dead_code)]
pub fn module(name: &str, endpoints: &[&str]) -> Module {
    endpoints
        .iter()
        .fold(Module::new(name), |m, ep| m.with_endpoint(endpoint(ep)))
}

/// The accepted local side: `pet` with `addPet`, plus `Pet` and `Category`
#[allow(dead_code)]
pub fn petstore_local() -> DataSource {
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
        .with_module(
            Module::new("store").with_endpoint(
                Endpoint::new("getInventory", HttpMethod::Get, "/store/inventory")
                    .with_response(DataType::primitive("object")),
            ),
        )
        .with_shared_type(
            SharedType::new("Category")
                .with_property(Property::new("id", DataType::primitive("integer")))
                .with_property(Property::new("name", DataType::primitive("string"))),
        )
        .with_shared_type(
            SharedType::new("Pet")
                .with_property(Property::new("category", DataType::shared("Category")))
                .with_property(Property::new("id", DataType::primitive("integer")))
                .with_property(Property::new("name", DataType::primitive("string")).required()),
        )
        .canonicalized()
}

/// The remote side: `pet` gains `deletePet`, nothing else changes
#[allow(dead_code)]
pub fn petstore_remote() -> DataSource {
    let mut remote = petstore_local();
    let pet = remote.modules.get_mut("pet").unwrap();
    pet.endpoints.insert(
        Endpoint::new("deletePet", HttpMethod::Delete, "/pet/{petId}")
            .with_description("Deletes a pet")
            .with_parameter(
                Parameter::new("petId", DataType::primitive("integer"))
                    .required()
                    .in_location(ParamLocation::Path),
            ),
    );
    remote.canonicalized()
}
