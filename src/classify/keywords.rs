//! Keyword tables for the local classifier.
//!
//! All keywords are lower-case and matched as substrings of the
//! lower-cased input. Table order is significant everywhere: areas break
//! ties by position, objectives and challenges are first-match-wins.

use super::types::BusinessArea;

pub const AREA_KEYWORDS: [(BusinessArea, &[&str]); 8] = [
    (
        BusinessArea::Marketing,
        &[
            "marketing", "ventas", "clientes", "campaña", "publicidad", "redes sociales",
            "branding", "conversión", "leads", "email marketing", "seo", "sem", "engagement",
            "embudo", "funnel", "anuncios", "promoción", "marca", "audiencia", "segmentación",
            "cta", "landing", "contenido", "influencer", "viral", "métricas", "cac", "ltv", "roi",
        ],
    ),
    (
        BusinessArea::Programacion,
        &[
            "código", "programar", "desarrollo", "software", "aplicación", "web", "api",
            "base de datos", "frontend", "backend", "javascript", "python", "react", "node",
            "algoritmo", "debugging", "framework", "biblioteca", "repositorio", "git", "testing",
            "deployment", "servidor", "hosting", "responsive", "móvil", "performance",
            "optimización", "seguridad", "autenticación",
        ],
    ),
    (
        BusinessArea::Finanzas,
        &[
            "dinero", "finanzas", "presupuesto", "inversión", "contabilidad", "gastos",
            "ingresos", "roi", "beneficios", "costos", "facturación", "impuestos",
            "flujo de caja", "capital", "rentabilidad", "margen", "ebitda", "balance",
            "estados financieros", "análisis financiero", "proyección", "forecast",
            "kpi financiero", "pricing", "monetización",
        ],
    ),
    (
        BusinessArea::RecursosHumanos,
        &[
            "empleados", "personal", "recursos humanos", "rrhh", "talento", "reclutamiento",
            "capacitación", "evaluación", "nómina", "bienestar", "cultura organizacional",
            "onboarding", "performance", "feedback", "desarrollo profesional", "liderazgo",
            "team building", "compensación", "beneficios", "rotación", "retención",
            "clima laboral", "engagement",
        ],
    ),
    (
        BusinessArea::AtencionCliente,
        &[
            "clientes", "soporte", "atención", "servicio", "quejas", "satisfacción", "chat",
            "helpdesk", "tickets", "resolución", "experiencia del cliente", "cx", "nps", "csat",
            "tiempo de respuesta", "escalación", "faq", "knowledge base", "autoservicio",
            "calidad", "seguimiento", "fidelización",
        ],
    ),
    (
        BusinessArea::Educacion,
        &[
            "enseñar", "educación", "estudiantes", "curso", "capacitación", "aprendizaje",
            "formación", "lecciones", "academia", "universidad", "e-learning", "lms",
            "currículo", "pedagogía", "evaluación", "certificación", "webinar", "tutorial",
            "mentoring", "coaching", "metodología", "competencias",
        ],
    ),
    (
        BusinessArea::Salud,
        &[
            "salud", "medicina", "pacientes", "tratamiento", "diagnóstico", "hospital",
            "clínica", "médico", "enfermería", "terapia", "bienestar", "prevención",
            "rehabilitación", "farmacia", "telemedicina", "historial médico", "síntomas",
            "procedimiento", "cirugía", "consulta", "emergencia",
        ],
    ),
    (
        BusinessArea::Creatividad,
        &[
            "diseño", "creatividad", "arte", "gráfico", "imagen", "video", "contenido",
            "creativo", "visual", "multimedia", "ilustración", "fotografía", "animación",
            "branding", "ui/ux", "prototipo", "mockup", "portfolio", "concepto",
            "storytelling", "narrativa", "producción",
        ],
    ),
];

/// A first-match-wins rule: any keyword hit yields `phrase`.
pub struct PhraseRule {
    pub keywords: &'static [&'static str],
    pub phrase: &'static str,
}

/// Objective archetypes: increase, reduce, optimize, create, analyze.
pub const OBJECTIVE_RULES: [PhraseRule; 5] = [
    PhraseRule {
        keywords: &[
            "aumentar", "incrementar", "mejorar", "subir", "crecer", "potenciar", "expandir",
            "ampliar", "maximizar", "elevar",
        ],
        phrase: "Aumentar ventas/conversiones",
    },
    PhraseRule {
        keywords: &[
            "reducir", "disminuir", "bajar", "minimizar", "ahorrar", "recortar", "limitar",
            "controlar", "eficientar",
        ],
        phrase: "Reducir costos/tiempos",
    },
    PhraseRule {
        keywords: &[
            "optimizar", "eficientar", "automatizar", "acelerar", "streamlining", "perfeccionar",
            "refinar",
        ],
        phrase: "Optimizar procesos",
    },
    PhraseRule {
        keywords: &[
            "crear", "desarrollar", "construir", "generar", "producir", "diseñar", "lanzar",
            "implementar", "establecer",
        ],
        phrase: "Crear contenido/producto",
    },
    PhraseRule {
        keywords: &[
            "analizar", "estudiar", "revisar", "evaluar", "medir", "investigar", "monitorear",
            "examinar",
        ],
        phrase: "Analizar datos/tendencias",
    },
];

pub const DEFAULT_OBJECTIVE: &str = "Mejorar eficiencia general";

/// Challenge patterns, scanned in this order.
pub const CHALLENGE_RULES: [PhraseRule; 8] = [
    PhraseRule {
        keywords: &["tiempo", "lento", "demora", "urgente", "deadline", "plazo", "rápido"],
        phrase: "Falta de tiempo",
    },
    PhraseRule {
        keywords: &[
            "recursos", "presupuesto", "dinero", "caro", "económico", "barato", "limitado",
            "escaso",
        ],
        phrase: "Recursos limitados",
    },
    PhraseRule {
        keywords: &["competencia", "rival", "mercado", "competir", "diferenciarse"],
        phrase: "Alta competencia",
    },
    PhraseRule {
        keywords: &["clientes", "satisfacción", "quejas", "retención", "fidelidad", "experiencia"],
        phrase: "Satisfacción del cliente",
    },
    PhraseRule {
        keywords: &["tecnología", "herramientas", "sistema", "plataforma", "integración", "technical"],
        phrase: "Limitaciones tecnológicas",
    },
    PhraseRule {
        keywords: &[
            "personal", "equipo", "capacidad", "habilidades", "conocimiento", "experiencia",
            "formación",
        ],
        phrase: "Capacitación del equipo",
    },
    PhraseRule {
        keywords: &["escalar", "crecimiento", "volumen", "dimensionar", "expandir"],
        phrase: "Escalabilidad",
    },
    PhraseRule {
        keywords: &["medición", "métricas", "resultados", "tracking", "analytics"],
        phrase: "Medición de resultados",
    },
];

pub const DEFAULT_CHALLENGE: &str = "Optimización de procesos";
