//! The compiled-in guide catalog.
//!
//! Paths are relative to the content root (the repository checkout by
//! default). Insertion order is display order.

use super::{Group, Leaf, Node};

pub(super) fn nodes() -> Vec<Node> {
    vec![
        Leaf::new("readme", "🏠 Welcome & Getting Started", "README.md")
            .category("overview")
            .badge("Start Here")
            .description("Your complete guide to the Tech Mastery Platform")
            .into(),
        Leaf::new("start-here", "🚀 Quick Start Guide", "START-HERE.md")
            .category("overview")
            .badge("Essential")
            .description("Your complete learning journey starts here")
            .into(),
        programming(),
        dsa(),
        ai_ml(),
        devops(),
        infrastructure(),
        system_design(),
        challenges(),
        career(),
        teaching(),
        extras(),
    ]
}

fn programming() -> Node {
    let leaf = |id: &str, title: &str, path: &str, minutes: u32, description: &str| -> Node {
        Leaf::new(id, title, path)
            .category("programming")
            .read_time(minutes)
            .description(description)
            .into()
    };
    Group::new(
        "programming",
        "💻 Programming Languages",
        vec![
            leaf(
                "python-guide",
                "Python Complete Guide",
                "guides/Python-Complete-Guide.md",
                120,
                "2000+ lines of Python mastery",
            ),
            leaf(
                "javascript-guide",
                "JavaScript Complete Guide",
                "guides/JavaScript-Complete-Guide.md",
                110,
                "Modern JavaScript from basics to advanced",
            ),
            leaf(
                "typescript-guide",
                "TypeScript Complete Guide",
                "guides/TypeScript-Complete-Guide.md",
                90,
                "Type-safe JavaScript development",
            ),
            leaf(
                "python-code",
                "Python Code Examples",
                "code-examples/python-mastery-guide.py",
                60,
                "Executable Python examples",
            ),
            leaf(
                "javascript-code",
                "JavaScript Code Examples",
                "code-examples/javascript-mastery-guide.js",
                50,
                "Executable JavaScript examples",
            ),
            leaf(
                "typescript-code",
                "TypeScript Code Examples",
                "code-examples/typescript-mastery-guide.ts",
                50,
                "Executable TypeScript examples",
            ),
        ],
    )
    .into()
}

fn dsa() -> Node {
    Group::new(
        "dsa",
        "📊 Data Structures & Algorithms",
        vec![
            Leaf::new(
                "dsa-zero-to-hero",
                "DSA Zero to Hero",
                "data-structures-algorithms-zero-to-hero.md",
            )
            .category("dsa")
            .badge("Essential")
            .read_time(180)
            .description("Complete beginner to expert DSA guide with 7000+ lines")
            .into(),
        ],
    )
    .into()
}

fn ai_ml() -> Node {
    let leaf = |id: &str, title: &str, file: &str, minutes: u32, description: &str| {
        Leaf::new(id, title, format!("guides/ai_ml/{file}"))
            .category("ai-ml")
            .read_time(minutes)
            .description(description)
    };
    Group::new(
        "ai-ml",
        "🤖 AI/ML & Data Science",
        vec![
            leaf(
                "master-roadmap",
                "ML/DS Complete Roadmap",
                "MASTER-ML-DS-COMPLETE-ROADMAP.md",
                60,
                "Your complete path from beginner to expert",
            )
            .badge("Essential")
            .into(),
            leaf(
                "learning-order",
                "AI/ML Learning Order",
                "LEARNING-ORDER-GUIDE.md",
                30,
                "Step-by-step learning sequence",
            )
            .badge("Start Here")
            .into(),
            leaf(
                "ml-quick-ref",
                "ML/DS Quick Reference",
                "ML-DS-QUICK-REFERENCE-CHEATSHEET.md",
                45,
                "Essential concepts cheatsheet",
            )
            .into(),
            leaf(
                "build-models",
                "Build ML Models From Scratch",
                "Build-ML-Models-From-Scratch-Complete-Guide.md",
                150,
                "Implement algorithms from first principles",
            )
            .into(),
            leaf(
                "feature-engineering",
                "Feature Engineering Complete Guide",
                "Feature-Engineering-Complete-Guide.md",
                90,
                "Master data preparation and feature creation",
            )
            .into(),
            leaf(
                "nlp-guide",
                "NLP Complete Guide",
                "NLP-Complete-Guide.md",
                120,
                "Natural Language Processing mastery",
            )
            .into(),
            leaf(
                "computer-vision",
                "Computer Vision Complete Guide",
                "Computer-Vision-Complete-Guide.md",
                120,
                "Image processing and deep learning",
            )
            .into(),
            leaf(
                "mlops-guide",
                "MLOps Production Complete Guide",
                "MLOps-Production-Complete-Guide.md",
                100,
                "Deploy and maintain ML systems",
            )
            .into(),
            leaf(
                "ai-agents",
                "AI Agents Complete Guide",
                "AI-Agents-Complete-Guide.md",
                80,
                "Build intelligent autonomous agents",
            )
            .into(),
            leaf(
                "llm-interview",
                "LLM Interview Questions",
                "LLM-Interview-Questions-Complete.md",
                60,
                "Complete LLM interview preparation",
            )
            .into(),
            leaf(
                "rag-interview",
                "RAG Interview Questions",
                "RAG-Interview-Questions-Complete.md",
                45,
                "RAG systems interview prep",
            )
            .into(),
        ],
    )
    .into()
}

fn devops() -> Node {
    let leaf = |id: &str, title: &str, file: &str, minutes: u32, description: &str| -> Node {
        Leaf::new(id, title, format!("guides/{file}"))
            .category("devops")
            .read_time(minutes)
            .description(description)
            .into()
    };
    Group::new(
        "devops",
        "☁️ DevOps & Infrastructure",
        vec![
            leaf(
                "docker-guide",
                "Docker Zero to Hero",
                "Docker-Zero-to-Hero.md",
                90,
                "Complete containerization mastery",
            ),
            leaf(
                "kubernetes-guide",
                "Kubernetes Zero to Hero",
                "Kubernetes-Zero-to-Hero.md",
                120,
                "Container orchestration expertise",
            ),
            leaf(
                "terraform-guide",
                "Terraform Zero to Hero",
                "Terraform-Zero-to-Hero.md",
                80,
                "Infrastructure as Code basics",
            ),
            leaf(
                "terraform-complete",
                "Terraform Complete Mastery",
                "Terraform-Complete-Mastery-Guide.md",
                150,
                "Advanced Terraform techniques",
            ),
            leaf(
                "terraform-part2",
                "Terraform Mastery Part 2",
                "Terraform-Complete-Mastery-Guide-Part2.md",
                120,
                "Advanced patterns and best practices",
            ),
            leaf(
                "ansible-guide",
                "Ansible Zero to Hero",
                "Ansible-Zero-to-Hero.md",
                80,
                "Configuration management automation",
            ),
        ],
    )
    .into()
}

fn infrastructure() -> Node {
    let leaf = |id: &str, title: &str, file: &str, minutes: u32, description: &str| -> Node {
        Leaf::new(id, title, format!("infrastructure/{file}"))
            .category("infrastructure")
            .read_time(minutes)
            .description(description)
            .into()
    };
    Group::new(
        "infrastructure-notebooks",
        "🏗️ Infrastructure Notebooks",
        vec![
            leaf(
                "ai-ml-systems",
                "AI/ML Systems Infrastructure",
                "ai-ml-systems.ipynb",
                45,
                "Building scalable AI/ML infrastructure",
            ),
            leaf(
                "cloud-devops",
                "Cloud & DevOps Practices",
                "cloud-devops.ipynb",
                40,
                "Cloud infrastructure and DevOps workflows",
            ),
            leaf(
                "database-design",
                "Database Design & Architecture",
                "database-design.ipynb",
                50,
                "Scalable database design patterns",
            ),
        ],
    )
    .into()
}

fn system_design() -> Node {
    let leaf = |id: &str,
                title: &str,
                path: &str,
                minutes: u32,
                badge: &str,
                description: &str|
     -> Node {
        Leaf::new(id, title, path)
            .category("system-design")
            .read_time(minutes)
            .badge(badge)
            .description(description)
            .into()
    };
    Group::new(
        "system-design",
        "🎯 System Design",
        vec![
            leaf(
                "complete-system-design",
                "📖 Complete System Design Guide",
                "system-design/COMPLETE-SYSTEM-DESIGN-GUIDE.md",
                180,
                "Must Read",
                "Comprehensive guide with diagrams and real-world examples",
            ),
            leaf(
                "system-architecture",
                "System Architecture Patterns",
                "system-design/architecture/system-architecture-patterns.ipynb",
                60,
                "Important",
                "Common architecture patterns and best practices",
            ),
            leaf(
                "hld-guide",
                "High-Level Design (HLD)",
                "system-design/hld/system-design-hld.ipynb",
                75,
                "Essential",
                "High-level system design concepts",
            ),
            leaf(
                "lld-guide",
                "Low-Level Design (LLD)",
                "system-design/lld/system-design-lld.ipynb",
                70,
                "Essential",
                "Low-level design and implementation details",
            ),
        ],
    )
    .into()
}

fn challenges() -> Node {
    Group::new(
        "programming-challenges",
        "💪 Programming Challenges",
        vec![
            Leaf::new(
                "python-challenges",
                "Python Challenges Notebook",
                "programming-challenges/python.challenges.ipynb",
            )
            .category("challenges")
            .read_time(90)
            .description("Python coding challenges and solutions")
            .into(),
            Leaf::new(
                "javascript-challenges",
                "JavaScript Challenges Notebook",
                "programming-challenges/javascript.challenges.ipynb",
            )
            .category("challenges")
            .read_time(85)
            .description("JavaScript coding challenges and solutions")
            .into(),
        ],
    )
    .into()
}

fn career() -> Node {
    let leaf = |id: &str, title: &str, path: &str, minutes: u32, description: &str| -> Node {
        Leaf::new(id, title, path)
            .category("career")
            .read_time(minutes)
            .description(description)
            .into()
    };
    Group::new(
        "career",
        "💼 Career Development",
        vec![
            leaf(
                "career-roadmap",
                "Career Roadmap",
                "docs/career-roadmap.md",
                30,
                "Plan your tech career progression",
            ),
            leaf(
                "interview-guide",
                "Interview Guide",
                "docs/interview-guide.md",
                45,
                "Ace your technical interviews",
            ),
            leaf(
                "fullstack-notes",
                "Full Stack Developer Training",
                "Full_Stack_Developer_Training_Notes.md",
                60,
                "Complete full stack development path",
            ),
        ],
    )
    .into()
}

fn teaching() -> Node {
    let leaf = |id: &str, title: &str, file: &str, minutes: u32, description: &str| -> Node {
        Leaf::new(id, title, format!("pythonclass/{file}"))
            .category("teaching")
            .read_time(minutes)
            .description(description)
            .into()
    };
    Group::new(
        "teaching",
        "🎓 Python Teaching Curriculum",
        vec![
            leaf(
                "teaching-plan",
                "Python Teaching Plan (12 Days)",
                "Python_Teaching_Plan_12_Days.md",
                40,
                "12-day comprehensive Python course",
            ),
            leaf(
                "part1-fundamentals",
                "Part 1: Python Fundamentals (Hours 1-10)",
                "Part1_Python_Fundamentals_Hours_1-10.md",
                90,
                "Python basics and core concepts",
            ),
            leaf(
                "part2-backend",
                "Part 2: Backend Development (Hours 11-20)",
                "Part2_Backend_Development_Hours_11-20.md",
                90,
                "Flask, APIs, and databases",
            ),
            leaf(
                "part3-frontend",
                "Part 3: Frontend Development (Hours 21-30)",
                "Part3_Frontend_Development_Hours_21-30.md",
                90,
                "HTML, CSS, JavaScript integration",
            ),
            leaf(
                "part4-advanced",
                "Part 4: Advanced Backend (Hours 31-40)",
                "Part4_Advanced_Backend_Hours_31-40.md",
                90,
                "Advanced patterns and deployment",
            ),
        ],
    )
    .into()
}

fn extras() -> Node {
    Group::new(
        "extras",
        "📚 Additional Resources",
        vec![
            Leaf::new(
                "vedic-math",
                "Vedic Mathematics Zero to Hero",
                "vedic-mathematics-zero-to-hero.md",
            )
            .category("extras")
            .read_time(60)
            .description("Ancient mathematical techniques")
            .into(),
        ],
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::flatten;

    #[test]
    fn test_builtin_shape() {
        let nodes = nodes();
        assert_eq!(nodes.len(), 12);
        assert_eq!(nodes[0].id(), "readme");
        assert!(nodes.iter().skip(2).all(Node::is_group));
    }

    #[test]
    fn test_builtin_leaf_order() {
        let nodes = nodes();
        let leaves = flatten(&nodes);
        assert_eq!(leaves.first().map(|l| l.id.as_str()), Some("readme"));
        assert_eq!(leaves.last().map(|l| l.id.as_str()), Some("vedic-math"));
        assert_eq!(leaves.len(), 44);
    }
}
