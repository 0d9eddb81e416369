//! `package.json` and `package-lock.json` pairs shared by the test suites.
//!
//! Every lockfile here is "pruned": all of its entries are reachable from the manifest, so parsing
//! and synthesizing it again must give back the same value.

use serde_json::{json, Value};

/// A project directory in memory.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub manifest: Value,
    pub lockfile: Value,
}

fn registry(name: &str, version: &str) -> String {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    format!("https://registry.npmjs.org/{name}/-/{file_name}-{version}.tgz")
}

fn lockfile(name: &str, dependencies: Value) -> Value {
    json!({
        "name": name,
        "version": "1.0.0",
        "lockfileVersion": 1,
        "requires": true,
        "dependencies": dependencies,
    })
}

/// A single direct dependency without dependencies of its own.
pub fn basic() -> Fixture {
    Fixture {
        name: "basic",
        manifest: json!({ "name": "basic", "dependencies": { "ms": "^2.1.3" } }),
        lockfile: lockfile(
            "basic",
            json!({
                "ms": {
                    "version": "2.1.3",
                    "resolved": registry("ms", "2.1.3"),
                    "integrity": "sha512-6FlzubTLZG3J2a/NVCAleEhjzq5oxgHyaCU9yYXvcLsvoVaHJq/s5xXI6/XXP6tz7R9xAOtHnSO/tXtF3WRTlA==",
                },
            }),
        ),
    }
}

/// Same as [`basic`] but the dependency is a dev dependency.
pub fn basic_dev() -> Fixture {
    Fixture {
        name: "basic-dev",
        manifest: json!({ "name": "basic-dev", "devDependencies": { "ms": "^2.1.3" } }),
        lockfile: lockfile(
            "basic-dev",
            json!({
                "ms": {
                    "version": "2.1.3",
                    "resolved": registry("ms", "2.1.3"),
                    "integrity": "sha512-6FlzubTLZG3J2a/NVCAleEhjzq5oxgHyaCU9yYXvcLsvoVaHJq/s5xXI6/XXP6tz7R9xAOtHnSO/tXtF3WRTlA==",
                    "dev": true,
                },
            }),
        ),
    }
}

/// A direct dependency with one hoisted dependency of its own.
pub fn nested() -> Fixture {
    Fixture {
        name: "nested",
        manifest: json!({ "name": "nested", "dependencies": { "debug": "^4.3.4" } }),
        lockfile: lockfile(
            "nested",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "requires": { "ms": "2.1.2" },
                },
                "ms": {
                    "version": "2.1.2",
                    "resolved": registry("ms", "2.1.2"),
                    "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                },
            }),
        ),
    }
}

/// Same as [`nested`] but the direct dependency is a dev dependency.
pub fn nested_dev() -> Fixture {
    Fixture {
        name: "nested-dev",
        manifest: json!({ "name": "nested-dev", "devDependencies": { "debug": "^4.3.4" } }),
        lockfile: lockfile(
            "nested-dev",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "dev": true,
                    "requires": { "ms": "2.1.2" },
                },
                "ms": {
                    "version": "2.1.2",
                    "resolved": registry("ms", "2.1.2"),
                    "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                    "dev": true,
                },
            }),
        ),
    }
}

/// A regular dependency that is also required by a dev dependency.
pub fn nested_mixed_dev() -> Fixture {
    Fixture {
        name: "nested-mixed-dev",
        manifest: json!({
            "name": "nested-mixed-dev",
            "dependencies": { "ms": "^2.1.2" },
            "devDependencies": { "debug": "^4.3.4" },
        }),
        lockfile: lockfile(
            "nested-mixed-dev",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "dev": true,
                    "requires": { "ms": "2.1.2" },
                },
                "ms": {
                    "version": "2.1.2",
                    "resolved": registry("ms", "2.1.2"),
                    "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                },
            }),
        ),
    }
}

/// Two direct dependencies where one requires the other at the same version.
pub fn nested_version_match() -> Fixture {
    Fixture {
        name: "nested-version-match",
        manifest: json!({
            "name": "nested-version-match",
            "dependencies": { "debug": "^4.3.4", "ms": "^2.1.2" },
        }),
        lockfile: lockfile(
            "nested-version-match",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "requires": { "ms": "2.1.2" },
                },
                "ms": {
                    "version": "2.1.2",
                    "resolved": registry("ms", "2.1.2"),
                    "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                },
            }),
        ),
    }
}

/// Two direct dependencies where one requires a different version of the other.
pub fn nested_version_mismatch() -> Fixture {
    Fixture {
        name: "nested-version-mismatch",
        manifest: json!({
            "name": "nested-version-mismatch",
            "dependencies": { "debug": "^4.3.4", "ms": "^2.1.3" },
        }),
        lockfile: lockfile(
            "nested-version-mismatch",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "requires": { "ms": "2.1.2" },
                    "dependencies": {
                        "ms": {
                            "version": "2.1.2",
                            "resolved": registry("ms", "2.1.2"),
                            "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                        },
                    },
                },
                "ms": {
                    "version": "2.1.3",
                    "resolved": registry("ms", "2.1.3"),
                    "integrity": "sha512-6FlzubTLZG3J2a/NVCAleEhjzq5oxgHyaCU9yYXvcLsvoVaHJq/s5xXI6/XXP6tz7R9xAOtHnSO/tXtF3WRTlA==",
                },
            }),
        ),
    }
}

/// Shadow overrides two levels deep: `send` carries its own `debug` which carries its own `ms`.
pub fn deep() -> Fixture {
    Fixture {
        name: "deep",
        manifest: json!({
            "name": "deep",
            "dependencies": { "send": "^0.18.0", "debug": "^4.3.4" },
        }),
        lockfile: lockfile(
            "deep",
            json!({
                "debug": {
                    "version": "4.3.4",
                    "resolved": registry("debug", "4.3.4"),
                    "integrity": "sha512-PRWFHuSU3eDtQJPvnNY7Jcket1j0t5OuOsFzPPzsekD52Zl8qUfFIPEiswXqIvHWGVHOgX+7G/vCNNhehwxfkQ==",
                    "requires": { "ms": "2.1.2" },
                },
                "ms": {
                    "version": "2.1.2",
                    "resolved": registry("ms", "2.1.2"),
                    "integrity": "sha512-sGkPx+VjMtmA6MX27oA4FBFELFCZZ4S4XqeGOXCv68tT+jb3vk/RyaKWP0PTKyWtmLSM0b+adUTEvbs1PEaH2w==",
                },
                "send": {
                    "version": "0.18.0",
                    "resolved": registry("send", "0.18.0"),
                    "integrity": "sha512-qqWzuOjSFOuqPjFe4NOsMLafToQQwBSOEpS+FwEt3A2V3vKubTquT3vmLTQpFgMXp8AlFWFuP1qKaJZOtPpVXg==",
                    "requires": { "debug": "2.6.9", "ms": "2.1.3" },
                    "dependencies": {
                        "debug": {
                            "version": "2.6.9",
                            "resolved": registry("debug", "2.6.9"),
                            "integrity": "sha512-bC7ElrdJaJnPbAP+1EotYvqZsb3ecl5wi6Bfi6BJTUcNowp6cvspg0jXznRTKDjm/E7AdgFBVeAPVMNcKGsHMA==",
                            "requires": { "ms": "2.0.0" },
                            "dependencies": {
                                "ms": {
                                    "version": "2.0.0",
                                    "resolved": registry("ms", "2.0.0"),
                                    "integrity": "sha512-Tpp60P6IUJDTuOq/5Z8cdskzJujfwqfOTkrwIwj7IRISpnkJnT6SyJ4PCPnGMoFjC9ddhal5KVIYtAt97ix05A==",
                                },
                            },
                        },
                        "ms": {
                            "version": "2.1.3",
                            "resolved": registry("ms", "2.1.3"),
                            "integrity": "sha512-6FlzubTLZG3J2a/NVCAleEhjzq5oxgHyaCU9yYXvcLsvoVaHJq/s5xXI6/XXP6tz7R9xAOtHnSO/tXtF3WRTlA==",
                        },
                    },
                },
            }),
        ),
    }
}

/// A nested package resolving a name through its parent's override table, not its own.
///
/// `glob-parent@3.1.0` lives in the table of `chokidar` and finds `is-glob@3.1.0` there.
pub fn shadowed_chain() -> Fixture {
    Fixture {
        name: "shadowed-chain",
        manifest: json!({
            "name": "shadowed-chain",
            "dependencies": { "chokidar": "^2.1.8", "glob-parent": "^5.1.2" },
        }),
        lockfile: lockfile(
            "shadowed-chain",
            json!({
                "chokidar": {
                    "version": "2.1.8",
                    "resolved": registry("chokidar", "2.1.8"),
                    "integrity": "sha512-ZmZUazfOzf0Nve7duiCKD23PFSCs4JPoYyccjUFF3aQkQadqBhfzhjkwBH2mNOG9cTBwhamM37EIsIkZw3nRgg==",
                    "requires": { "glob-parent": "^3.1.0" },
                    "dependencies": {
                        "glob-parent": {
                            "version": "3.1.0",
                            "resolved": registry("glob-parent", "3.1.0"),
                            "integrity": "sha1-nmr2KZ2NO9K9QEMIMr0RPfkGxa4=",
                            "requires": { "is-glob": "^3.1.0" },
                        },
                        "is-glob": {
                            "version": "3.1.0",
                            "resolved": registry("is-glob", "3.1.0"),
                            "integrity": "sha1-e6WuJCF4BKxwcHuWkiVnSGzD6Eo=",
                            "requires": { "is-extglob": "^2.1.0" },
                        },
                    },
                },
                "glob-parent": {
                    "version": "5.1.2",
                    "resolved": registry("glob-parent", "5.1.2"),
                    "integrity": "sha512-AOIgSQCepiJYwP3ARnGx+5VnTu2HBYdzbGP45eLw1vr3zB3vZLeyed1sC9hnbcOc9/SrMyM5RPQrkGz4aS9Zow==",
                    "requires": { "is-glob": "^4.0.1" },
                },
                "is-extglob": {
                    "version": "2.1.1",
                    "resolved": registry("is-extglob", "2.1.1"),
                    "integrity": "sha1-qIwCU1eR8C7TfHahueqXc8gz+MI=",
                },
                "is-glob": {
                    "version": "4.0.3",
                    "resolved": registry("is-glob", "4.0.3"),
                    "integrity": "sha512-xelSayHH36ZgE7ZWhli7pW34hNbNl8Ojv5KVmkJD4hBdD3th8Tfk9vYasLM+mXWOZhFkgZfxhLSnrwRr4elSSg==",
                    "requires": { "is-extglob": "^2.1.1" },
                },
            }),
        ),
    }
}

/// Siblings under one override table disagreeing on a name: `tar/lru-cache` carries its own
/// `yallist`, `tar/minipass` takes the hoisted one.
pub fn sibling_override() -> Fixture {
    Fixture {
        name: "sibling-override",
        manifest: json!({
            "name": "sibling-override",
            "dependencies": { "lru-cache": "^6.0.0", "minipass": "^7.0.4", "tar": "^4.4.19" },
        }),
        lockfile: lockfile(
            "sibling-override",
            json!({
                "lru-cache": {
                    "version": "6.0.0",
                    "resolved": registry("lru-cache", "6.0.0"),
                    "requires": { "yallist": "^4.0.0" },
                },
                "minipass": {
                    "version": "7.0.4",
                    "resolved": registry("minipass", "7.0.4"),
                },
                "tar": {
                    "version": "4.4.19",
                    "resolved": registry("tar", "4.4.19"),
                    "requires": { "lru-cache": "^5.1.1", "minipass": "^3.3.6" },
                    "dependencies": {
                        "lru-cache": {
                            "version": "5.1.1",
                            "resolved": registry("lru-cache", "5.1.1"),
                            "requires": { "yallist": "^3.0.2" },
                            "dependencies": {
                                "yallist": {
                                    "version": "3.1.1",
                                    "resolved": registry("yallist", "3.1.1"),
                                },
                            },
                        },
                        "minipass": {
                            "version": "3.3.6",
                            "resolved": registry("minipass", "3.3.6"),
                            "requires": { "yallist": "^4.0.0" },
                        },
                    },
                },
                "yallist": {
                    "version": "4.0.0",
                    "resolved": registry("yallist", "4.0.0"),
                },
            }),
        ),
    }
}

/// Two packages requiring each other.
pub fn cyclic() -> Fixture {
    Fixture {
        name: "cyclic",
        manifest: json!({ "name": "cyclic", "dependencies": { "es-abstract": "^1.22.0" } }),
        lockfile: lockfile(
            "cyclic",
            json!({
                "es-abstract": {
                    "version": "1.22.3",
                    "resolved": registry("es-abstract", "1.22.3"),
                    "integrity": "sha512-eiiY8HQeYfYH2Con2berK+To6GrK2RxbPawDkGq4UiCQQfZHb6wX9qQqkbpPqaxQFcl8d9QzZqo0tGE0VcrdwA==",
                    "requires": { "string.prototype.trim": "^1.2.8" },
                },
                "string.prototype.trim": {
                    "version": "1.2.8",
                    "resolved": registry("string.prototype.trim", "1.2.8"),
                    "integrity": "sha512-lfjY4HcixfQXOfaqCvcBuOIapyaroTXhbkfJN3gcB1OtyupngWK4sEET9Knd0cXd28kTUqu/kHoV4HKSJdnjiQ==",
                    "requires": { "es-abstract": "^1.22.1" },
                },
            }),
        ),
    }
}

/// A peer dependency installed at the root together with its own dependencies.
pub fn peer() -> Fixture {
    Fixture {
        name: "peer",
        manifest: json!({
            "name": "peer",
            "dependencies": { "ms": "^2.1.3" },
            "peerDependencies": { "react": "^18.0.0", "react-dom": "^18.0.0" },
        }),
        lockfile: lockfile(
            "peer",
            json!({
                "js-tokens": {
                    "version": "4.0.0",
                    "resolved": registry("js-tokens", "4.0.0"),
                    "integrity": "sha512-RdJUflcE3cUzKiMqQgsCu06FPu9UdIJO0beYbPhHN4k6apgJtifcoCtT9bcxOpYBtpD2kCM6Sbzg4CausW/PKQ==",
                    "peer": true,
                },
                "loose-envify": {
                    "version": "1.4.0",
                    "resolved": registry("loose-envify", "1.4.0"),
                    "integrity": "sha512-lyuxPGr/Wfhrlem2CL/UcnUc1zcqKAImBDzukY7Y5F/yQiNdko6+fRLevlw1HgMySw7f611UIY408EtxRSoK3Q==",
                    "peer": true,
                    "requires": { "js-tokens": "^3.0.0 || ^4.0.0" },
                },
                "ms": {
                    "version": "2.1.3",
                    "resolved": registry("ms", "2.1.3"),
                    "integrity": "sha512-6FlzubTLZG3J2a/NVCAleEhjzq5oxgHyaCU9yYXvcLsvoVaHJq/s5xXI6/XXP6tz7R9xAOtHnSO/tXtF3WRTlA==",
                },
                "react": {
                    "version": "18.2.0",
                    "resolved": registry("react", "18.2.0"),
                    "integrity": "sha512-/3IjMdb2L9QbBdWiW5e3P2/npwMBaU9mHCSCUzNln0ZCYbcfTsGbTJrU/kGemdH2IWmB2ioZ+zkxtmq6g09fGQ==",
                    "peer": true,
                    "requires": { "loose-envify": "^1.1.0" },
                },
            }),
        ),
    }
}

/// Every fixture whose lockfile survives a parse and synth cycle unchanged.
pub fn all() -> Vec<Fixture> {
    vec![
        basic(),
        basic_dev(),
        nested(),
        nested_dev(),
        nested_mixed_dev(),
        nested_version_match(),
        nested_version_mismatch(),
        deep(),
        shadowed_chain(),
        sibling_override(),
        cyclic(),
        peer(),
    ]
}
