use rand::{rngs::StdRng, Rng, SeedableRng};

/// Static catalog entry: icon identifier plus display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BadgeSpec {
    pub id: &'static str,
    pub label: &'static str,
}

const fn spec(id: &'static str, label: &'static str) -> BadgeSpec {
    BadgeSpec { id, label }
}

/// Technologies shown on the globe. Ids are Simple Icons slugs.
pub const DEFAULT_CATALOG: &[BadgeSpec] = &[
    // Core & front-end
    spec("javascript", "JavaScript"),
    spec("typescript", "TypeScript"),
    spec("html5", "HTML"),
    spec("css3", "CSS"),
    spec("react", "React"),
    spec("angular", "Angular"),
    spec("nextdotjs", "Next.js"),
    spec("bootstrap", "Bootstrap"),
    spec("threedotjs", "Three.js"),
    spec("streamlit", "Streamlit"),
    // Backend & APIs
    spec("nodedotjs", "Node.js"),
    spec("flask", "Flask"),
    spec("fastapi", "FastAPI"),
    spec("django", "Django"),
    spec("apache", "Apache"),
    spec("nginx", "NGINX"),
    spec("graphql", "GraphQL"),
    // Databases & queues
    spec("postgresql", "PostgreSQL"),
    spec("mysql", "MySQL"),
    spec("mongodb", "MongoDB"),
    spec("redis", "Redis"),
    spec("elasticsearch", "Elasticsearch"),
    spec("rabbitmq", "RabbitMQ"),
    spec("apachekafka", "Kafka"),
    // AI/ML & tooling
    spec("openai", "OpenAI"),
    spec("langchain", "LangChain"),
    spec("opencv", "OpenCV"),
    spec("tensorflow", "TensorFlow"),
    spec("pytorch", "PyTorch"),
    spec("numpy", "NumPy"),
    spec("pandas", "Pandas"),
    // Cloud & DevOps
    spec("amazonaws", "AWS"),
    spec("microsoftazure", "Azure"),
    spec("googlecloud", "GCP"),
    spec("docker", "Docker"),
    spec("kubernetes", "Kubernetes"),
    spec("githubactions", "GitHub Actions"),
    spec("vercel", "Vercel"),
    spec("netlify", "Netlify"),
    spec("cloudflare", "Cloudflare"),
    spec("render", "Render"),
    // Tools & OS
    spec("git", "Git"),
    spec("github", "GitHub"),
    spec("visualstudiocode", "VS Code"),
    spec("postman", "Postman"),
    spec("figma", "Figma"),
    spec("balsamiq", "Balsamiq"),
    spec("inkscape", "Inkscape"),
    spec("adobeillustrator", "Illustrator"),
    spec("linux", "Linux"),
    spec("ubuntu", "Ubuntu"),
    // Styling, build & data platforms
    spec("tailwindcss", "Tailwind CSS"),
    spec("mui", "MUI"),
    spec("framer", "Framer Motion"),
    spec("vite", "Vite"),
    spec("webpack", "Webpack"),
    spec("sass", "Sass / SCSS"),
    spec("microsoftsqlserver", "SQL Server"),
    spec("sqlite", "SQLite"),
    spec("supabase", "Supabase"),
    spec("prisma", "Prisma"),
    spec("firebase", "Firebase"),
    spec("huggingface", "Hugging Face"),
    spec("scikitlearn", "scikit-learn"),
    spec("railway", "Railway"),
    spec("heroku", "Heroku"),
];

/// Number of badges for a catalog at a given density; never below 1.
pub fn badge_total(catalog_len: usize, density: f32) -> usize {
    let total = (catalog_len as f32 * density.max(0.0)).round() as usize;
    total.max(1)
}

/// Wrap-around walk over the catalog from a per-session starting offset.
///
/// The offset is the only randomized element of a build; it is derived from a
/// single seed so tests can pin it.
#[derive(Clone, Copy, Debug)]
pub struct CatalogCycle<'a> {
    catalog: &'a [BadgeSpec],
    offset: usize,
}

impl<'a> CatalogCycle<'a> {
    pub fn new(catalog: &'a [BadgeSpec], seed: u64) -> Self {
        let offset = if catalog.is_empty() {
            0
        } else {
            StdRng::seed_from_u64(seed).gen_range(0..catalog.len())
        };
        Self { catalog, offset }
    }

    pub fn with_offset(catalog: &'a [BadgeSpec], offset: usize) -> Self {
        Self { catalog, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of distinct entries in the underlying catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Spec for badge `i`, or `None` for an empty catalog.
    pub fn get(&self, i: usize) -> Option<BadgeSpec> {
        if self.catalog.is_empty() {
            return None;
        }
        Some(self.catalog[(self.offset + i) % self.catalog.len()])
    }
}
