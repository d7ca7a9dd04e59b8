//! Initialize a new Folio site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::Folio;
use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
name: Folio
description: ''
author: John Doe
email: ''
language: en

# URL
url: http://example.com

# Directory
posts_dir: content/posts
public_dir: public
static_dir: static

# Content loading
## Seconds a loaded collection is reused by the server (0 disables caching)
revalidate: 3600
## fail | skip
on_invalid: fail

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const STYLESHEET: &str = r#"body { max-width: 42rem; margin: 2rem auto; padding: 0 1rem; font-family: sans-serif; line-height: 1.6; }
pre { overflow-x: auto; padding: 1rem; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let config = SiteConfig::default();
    let posts_dir = target_dir.join(&config.posts_dir);
    let static_dir = target_dir.join(&config.static_dir);

    // Create directory structure
    fs::create_dir_all(&posts_dir)
        .with_context(|| format!("Failed to create {}", posts_dir.display()))?;
    fs::create_dir_all(static_dir.join("css"))?;

    fs::write(target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;
    fs::write(static_dir.join("css/site.css"), STYLESHEET)?;

    // Create a sample post
    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
kind: note
tags: [meta]
excerpt: The first post on this site.
---

Welcome to your new blog! Posts are Markdown files in `{}`.

## Quick Start

### Create a new post

```bash
$ folio new "My New Post" --kind article
```

### Run server

```bash
$ folio server
```

### Generate static files

```bash
$ folio generate
```
"#,
        today.format("%Y-%m-%d"),
        config.posts_dir
    );

    fs::write(posts_dir.join("hello-world.md"), sample_post)?;

    Ok(())
}

/// Run the init command with an existing Folio instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}
