mod common;

use anyhow::Result;
use common::{TestTree, relative_sorted};
use rstest::rstest;
use smupdate::classify::{PLUGIN, SOURCE};
use smupdate::error::Error;
use smupdate::keyvalues::Node;
use smupdate::manifest::{ManifestBuilder, Root};
use smupdate::remap::PathRemapper;
use smupdate::walker::{TreeWalker, WalkOptions, WalkOrder};

#[test]
fn test_single_sourcemod_root() -> Result<()> {
    let out = TestTree::with_files(&["scripting/a.sp", "plugins/a.smx"])?;

    let doc = ManifestBuilder::new("1.2.3")
        .note("fix bug")
        .root(Root::sourcemod(out.path()))
        .build()?;

    assert_eq!(doc.version(), Some("1.2.3"));
    assert_eq!(doc.notes().collect::<Vec<_>>(), vec!["fix bug"]);

    let files: Vec<(&str, &str)> = doc
        .files()
        .iter()
        .map(|(k, v)| (k, v.as_value().unwrap()))
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&(SOURCE, "Path_SM/scripting/a.sp")));
    assert!(files.contains(&(PLUGIN, "Path_SM/plugins/a.smx")));
    Ok(())
}

#[test]
fn test_rendered_document() -> Result<()> {
    let out = TestTree::with_files(&["scripting/a.sp", "plugins/a.smx"])?;

    let doc = ManifestBuilder::new("1.2.3")
        .note("fix bug")
        .root(Root::sourcemod(out.path()))
        .build()?;

    // Bottom-up, children in name order: plugins/ finishes before scripting/
    let expected = "\"Updater\"\n{\n\
        \t\"Information\"\n\t{\n\
        \t\t\"Version\"\n\t\t{\n\
        \t\t\t\"Latest\"\t\t\"1.2.3\"\n\
        \t\t}\n\
        \t\t\"Notes\"\t\t\"fix bug\"\n\
        \t}\n\
        \t\"Files\"\n\t{\n\
        \t\t\"Plugin\"\t\t\"Path_SM/plugins/a.smx\"\n\
        \t\t\"Source\"\t\t\"Path_SM/scripting/a.sp\"\n\
        \t}\n\
        }\n";
    assert_eq!(doc.render(), expected);
    Ok(())
}

#[test]
fn test_plugins_sharing_a_category_are_all_listed() -> Result<()> {
    let out = TestTree::with_files(&["plugins/one.smx", "plugins/two.smx"])?;

    let doc = ManifestBuilder::new("1.0")
        .root(Root::sourcemod(out.path()))
        .build()?;

    let plugins: Vec<&Node> = doc.files().get_all(PLUGIN).collect();
    assert_eq!(plugins.len(), 2);
    Ok(())
}

#[test]
fn test_sourcemod_and_mod_roots() -> Result<()> {
    let build = TestTree::with_files(&[
        "addons/sourcemod/plugins/x.smx",
        "addons/sourcemod/scripting/x.sp",
        "cfg/y.cfg",
        "sound/z.wav",
    ])?;

    let doc = ManifestBuilder::new("2.0")
        .root(Root::sourcemod(build.join("addons/sourcemod")))
        .root(Root::game_mod(build.path()))
        .build()?;

    let mut plugins: Vec<&str> = doc.files_in(PLUGIN).collect();
    plugins.sort_unstable();
    assert_eq!(
        plugins,
        vec!["Path_Mod/cfg/y.cfg", "Path_Mod/sound/z.wav", "Path_SM/plugins/x.smx"]
    );
    assert_eq!(
        doc.files_in(SOURCE).collect::<Vec<_>>(),
        vec!["Path_SM/scripting/x.sp"]
    );
    Ok(())
}

#[test]
fn test_empty_root_gives_empty_files() -> Result<()> {
    let out = TestTree::new()?;
    out.mkdir("plugins")?;

    let doc = ManifestBuilder::new("1.0")
        .root(Root::sourcemod(out.path()))
        .build()?;

    assert!(doc.files().is_empty());
    assert!(doc.to_keyvalues().section("Updater").is_some());
    Ok(())
}

#[test]
fn test_missing_root_is_reported() -> Result<()> {
    let out = TestTree::new()?;
    let missing = out.join("nope");

    let err = ManifestBuilder::new("1.0")
        .root(Root::sourcemod(&missing))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(err.path(), missing.as_path());
    assert!(err.to_string().contains("nope"));
    Ok(())
}

#[test]
fn test_file_as_root_is_reported() -> Result<()> {
    let out = TestTree::with_files(&["plugin.smx"])?;

    let err = ManifestBuilder::new("1.0")
        .root(Root::sourcemod(out.join("plugin.smx")))
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::NotADirectory { .. }));
    Ok(())
}

#[test]
fn test_remap_outside_root() -> Result<()> {
    let out = TestTree::new()?;
    let remapper = PathRemapper::new(out.join("build"), "Path_SM");

    let err = remapper.format(&out.join("elsewhere/a.smx")).unwrap_err();
    assert!(matches!(err, Error::PathOutsideRoot { .. }));
    Ok(())
}

#[rstest]
#[case::top_down(WalkOrder::TopDown)]
#[case::bottom_up(WalkOrder::BottomUp)]
fn test_walk_order_yields_every_file(#[case] order: WalkOrder) -> Result<()> {
    let tree = TestTree::with_files(&["a/b/c.txt", "a/d.txt", "e.txt", "f/g/h/i.txt"])?;
    tree.mkdir("empty")?;

    let files = TreeWalker::new(tree.path())
        .options(WalkOptions {
            order,
            follow_links: false,
        })
        .files()?
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(
        relative_sorted(tree.path(), files),
        vec!["a/b/c.txt", "a/d.txt", "e.txt", "f/g/h/i.txt"]
    );
    Ok(())
}

#[test]
fn test_bottom_up_yields_children_before_parents() -> Result<()> {
    let tree = TestTree::with_files(&["a/b/c.txt"])?;

    let dirs: Vec<_> = TreeWalker::new(tree.path())
        .order(WalkOrder::BottomUp)
        .walk()?
        .map(|g| g.map(|g| g.dir))
        .collect::<Result<_, _>>()?;

    assert_eq!(
        dirs,
        vec![tree.join("a/b"), tree.join("a"), tree.path().to_path_buf()]
    );
    Ok(())
}

#[test]
fn test_top_down_yields_parents_first() -> Result<()> {
    let tree = TestTree::with_files(&["a/b/c.txt"])?;

    let dirs: Vec<_> = TreeWalker::new(tree.path())
        .order(WalkOrder::TopDown)
        .walk()?
        .map(|g| g.map(|g| g.dir))
        .collect::<Result<_, _>>()?;

    assert_eq!(
        dirs,
        vec![tree.path().to_path_buf(), tree.join("a"), tree.join("a/b")]
    );
    Ok(())
}
