//! Property-based tests for mount discovery and tree cleanup.
//!
//! Trees are generated as lists of parent indices, so every generated shape
//! is a valid tree.

use super::*;
use crate::fs::{exists, MemoryFileSystem};
use crate::path::Path;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Node {
    parent: usize,
    is_dir: bool,
    mount: bool,
}

fn tree_strategy() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec((any::<prop::sample::Index>(), any::<bool>(), any::<bool>()), 0..40)
        .prop_map(|raw| {
            let mut nodes: Vec<Node> = Vec::with_capacity(raw.len());
            for (index, is_dir, mount) in raw {
                let dirs: Vec<usize> = std::iter::once(0)
                    .chain(
                        nodes
                            .iter()
                            .enumerate()
                            .filter(|(_, n)| n.is_dir)
                            .map(|(i, _)| i + 1),
                    )
                    .collect();
                nodes.push(Node {
                    parent: dirs[index.index(dirs.len())],
                    is_dir,
                    mount: is_dir && mount,
                });
            }
            nodes
        })
}

/// Build the tree under `/t`; node `i` lives at the returned path `i + 1`.
fn build(fs: &MemoryFileSystem, nodes: &[Node]) -> Vec<String> {
    let mut paths = vec!["/t".to_string()];
    fs.create_dir("/t").unwrap();
    let mut device = 100;

    for (i, node) in nodes.iter().enumerate() {
        let path = format!("{}/n{i}", paths[node.parent]);
        if node.is_dir {
            fs.create_dir(&path).unwrap();
            if node.mount {
                device += 1;
                fs.mount(&path, device).unwrap();
            }
        } else {
            fs.create_file(&path).unwrap();
        }
        paths.push(path);
    }
    paths
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    /// Cleanup removes the whole tree and nothing else
    #[test]
    fn cleanup_removes_everything(nodes in tree_strategy()) {
        let fs = MemoryFileSystem::new();
        fs.create_dir("/keep").unwrap();
        build(&fs, &nodes);

        let result = cleanup(&fs, &Path::new("/t").unwrap()).unwrap();
        prop_assert!(!exists(&fs, &Path::new("/t").unwrap()).unwrap());
        prop_assert!(fs.contains("/keep"));
        prop_assert_eq!(fs.len(), 2);
        prop_assert_eq!(
            result.unmounted.len(),
            nodes.iter().filter(|n| n.mount).count()
        );
    }

    /// Every mount point is reported, and before any mount point enclosing it
    #[test]
    fn mounts_listed_deepest_first(nodes in tree_strategy()) {
        let fs = MemoryFileSystem::new();
        let paths = build(&fs, &nodes);

        let mounts = MountScanner::new(&fs).scan(&Path::new("/t").unwrap()).unwrap();
        let expected = nodes.iter().filter(|n| n.mount).count();
        prop_assert_eq!(mounts.len(), expected);

        for (i, node) in nodes.iter().enumerate() {
            if node.mount {
                prop_assert!(mounts.contains(&Path::new(&paths[i + 1]).unwrap()));
            }
        }

        for (i, later) in mounts.iter().enumerate() {
            for earlier in &mounts[..i] {
                let prefix = format!("{}/", earlier.as_str());
                prop_assert!(
                    !later.as_str().starts_with(&prefix),
                    "{} listed before its descendant {}", earlier, later
                );
            }
        }
    }

    /// Planning never issues a destructive call
    #[test]
    fn plan_is_read_only(nodes in tree_strategy()) {
        let fs = MemoryFileSystem::new();
        build(&fs, &nodes);
        let before = fs.len();

        TreeCleaner::new(&fs).plan(&Path::new("/t").unwrap()).unwrap();
        prop_assert!(fs.destructive_calls().is_empty());
        prop_assert_eq!(fs.len(), before);
    }
}
