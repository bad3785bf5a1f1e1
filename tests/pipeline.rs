use std::path::{Path, PathBuf};

use dep2lambda::{
    DepTree, PipelineConfig, PipelineError, Term, Token, Transformer,
    dependency::{
        PostProcessor,
        mapping::{EventMapping, QuantificationalMapping},
        preprocess::{MergeDirection, assign_ontology, enrich_determiners, merge_compounds},
    },
    validate_semantic_form,
};

fn get_resource_path() -> anyhow::Result<PathBuf> {
    let cargo_path = std::env::var("CARGO_MANIFEST_DIR")?;
    Ok(Path::new(&cargo_path).join("tests").join("resources"))
}

fn load_tree(file: &str) -> anyhow::Result<DepTree> {
    let s = std::fs::read_to_string(get_resource_path()?.join(file))?;
    Ok(DepTree::from_token(&Token::from_json(&s)?))
}

fn load_config(file: &str) -> anyhow::Result<PipelineConfig> {
    let s = std::fs::read_to_string(get_resource_path()?.join(file))?;
    Ok(PipelineConfig::from_json(&s)?)
}

#[test]
fn event_semantics() -> anyhow::Result<()> {
    let tree = load_tree("disney_acquired_pixar.json")?;
    let mut transformer = Transformer::new(EventMapping, PipelineConfig::default());
    let semantics = transformer.semantics(&tree)?;
    assert_eq!(
        semantics.to_string(),
        r#"lambda <1>."w-acquired"(<1>) & "w-Pixar"(<2>) & "arg2"(<1>, <2>) & "w-Disney"(<3>) & "arg1"(<1>, <3>)"#
    );
    validate_semantic_form(&semantics)?;
    assert_eq!(PostProcessor.flatten_and_validate(&semantics)?, semantics);
    Ok(())
}

#[test]
fn configured_semantics() -> anyhow::Result<()> {
    let tree = load_tree("disney_acquired_pixar.json")?;
    let mut transformer = Transformer::new(EventMapping, load_config("subject_first.json")?);
    assert_eq!(
        transformer.semantics(&tree)?.to_string(),
        r#"lambda <10>."w-acquired"(<10>) & "w-Disney"(<11>) & "arg1"(<10>, <11>) & "w-Pixar"(<12>) & "arg2"(<10>, <12>)"#
    );
    Ok(())
}

#[test]
fn compounds() -> anyhow::Result<()> {
    let tree = load_tree("new_york_fell.json")?;
    let mut transformer = Transformer::new(EventMapping, PipelineConfig::default());
    assert!(matches!(
        transformer.semantics(&tree),
        Err(PipelineError::UnknownRelation(label)) if label == "l-compound"
    ));

    let merged = merge_compounds(&tree, "compound", MergeDirection::RightToLeft);
    assert_eq!(
        transformer.semantics(&merged)?.to_string(),
        r#"lambda <1>."w-fell"(<1>) & "w-New_York"(<2>) & "arg1"(<1>, <2>)"#
    );
    Ok(())
}

#[test]
fn quantified_subject() -> anyhow::Result<()> {
    let tree = assign_ontology(&enrich_determiners(&load_tree("every_dog_barks.json")?));
    let mut transformer = Transformer::new(QuantificationalMapping, PipelineConfig::default());
    let semantics = transformer.semantics(&tree)?;
    assert_eq!(
        semantics,
        r#"lambda <1>.every <2>."dog"(<2>) -> (some <3>."barks"(<3>) & <1>(<3>) & "ag"(<3>, <2>))"#
            .parse::<Term>()?
    );

    //Without enrichment the determiner has no term.
    let tree = assign_ontology(&load_tree("every_dog_barks.json")?);
    assert!(matches!(
        transformer.semantics(&tree),
        Err(PipelineError::UnknownRelation(label)) if label == "l-det"
    ));
    Ok(())
}

#[test]
fn individuals_and_objects() -> anyhow::Result<()> {
    let tree = load_tree("disney_acquired_pixar.json")?;
    //Universal Dependencies v2 calls the object `obj` and the mapping has no `punct`.
    let mut token: Token = serde_json::from_str(&std::fs::read_to_string(
        get_resource_path()?.join("disney_acquired_pixar.json"),
    )?)?;
    token.children.retain(|x| x.dep != "punct");
    for child in &mut token.children {
        if child.dep == "dobj" {
            child.dep = "obj".to_string();
        }
    }
    let tree_v2 = assign_ontology(&DepTree::from_token(&token));

    let mut transformer = Transformer::new(QuantificationalMapping, PipelineConfig::default());
    assert_eq!(
        transformer.semantics(&tree_v2)?.to_string(),
        r#"lambda <1>.some <2>."acquired"(<2>) & <1>(<2>) & "ag"(<2>, "Disney") & "th"(<2>, "Pixar")"#
    );
    assert!(transformer.semantics(&assign_ontology(&tree)).is_err());
    Ok(())
}

#[test]
fn copular_events() -> anyhow::Result<()> {
    let tree = assign_ontology(&load_tree("she_is_happy.json")?);
    let mut transformer = Transformer::new(QuantificationalMapping, PipelineConfig::default());
    let semantics = transformer.semantics(&tree)?;
    assert_eq!(
        semantics.to_string(),
        r#"lambda <1>.some <2>."happy"(<2>) & <1>(<2>) & "ag"(<2>, "She")"#
    );
    assert!(validate_semantic_form(&semantics).is_err());
    Ok(())
}
