//! Vocabulary constants

/// Dublin Core terms
pub mod dc {
    pub const NS: &str = "http://purl.org/dc/terms/";
    pub const CREATED: &str = "http://purl.org/dc/terms/created";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    pub const PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
    pub const RIGHTS: &str = "http://purl.org/dc/terms/rights";
    pub const EDUCATION_LEVEL: &str = "http://purl.org/dc/terms/educationLevel";
}

pub mod foaf {
    pub const BASED_NEAR: &str = "http://xmlns.com/foaf/0.1/based_near";
}

pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
}

/// Fedora 3 model and relations-external namespaces
pub mod fedora {
    pub const MODEL_NS: &str = "info:fedora/fedora-system:def/model#";
    pub const RELATIONS_NS: &str = "info:fedora/fedora-system:def/relations-external#";
    pub const HAS_MODEL: &str = "info:fedora/fedora-system:def/model#hasModel";

    /// Local names in the relations-external namespace
    pub const RELATIONS: &[&str] = &[
        "conformsTo",
        "hasAnnotation",
        "hasCollectionMember",
        "hasConstituent",
        "hasDependent",
        "hasDerivation",
        "hasDescription",
        "hasEquivalent",
        "hasMember",
        "hasMetadata",
        "hasPart",
        "hasSubset",
        "isAnnotationOf",
        "isConstituentOf",
        "isDependentOf",
        "isDerivationOf",
        "isDescriptionOf",
        "isMemberOf",
        "isMemberOfCollection",
        "isMetadataFor",
        "isPartOf",
        "isSubsetOf",
    ];
}

/// Fedora 4 repository vocabulary
pub mod fcrepo4 {
    pub const NS: &str = "http://fedora.info/definitions/v4/repository#";
    pub const CREATED: &str = "http://fedora.info/definitions/v4/repository#created";
    pub const HAS_VERSION: &str = "http://fedora.info/definitions/v4/repository#hasVersion";
    pub const HAS_VERSION_LABEL: &str = "http://fedora.info/definitions/v4/repository#hasVersionLabel";
    pub const LAST_MODIFIED: &str = "http://fedora.info/definitions/v4/repository#lastModified";
}
